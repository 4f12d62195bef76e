// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use devnotify_hid::DeviceSignature;

#[test]
fn test_match_token_formatting() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert_eq!(signature.match_token(), "VID_1A86&PID_FE07");
}

#[test]
fn test_match_token_zero_padding() {
    let signature = DeviceSignature::new(0x0001, 0x002A);
    assert_eq!(signature.match_token(), "VID_0001&PID_002A");
}

#[test]
fn test_matches_full_interface_path() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    let path = r"\\?\USB#VID_1A86&PID_FE07#6&abc#{a5dcbf10-6530-11d2-901f-00c04fb951ed}";
    assert!(signature.matches(path));
}

#[test]
fn test_matches_token_with_surrounding_segments() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert!(signature.matches(r"\\?\USB#ROOT_HUB30#VID_1A86&PID_FE07&MI_00#7&2def"));
    assert!(signature.matches("VID_1A86&PID_FE07"));
}

#[test]
fn test_rejects_other_device() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    let path = r"\\?\USB#VID_0001&PID_0002#7&def#{a5dcbf10-6530-11d2-901f-00c04fb951ed}";
    assert!(!signature.matches(path));
}

#[test]
fn test_rejects_lowercase_token() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert!(!signature.matches(r"\\?\USB#vid_1a86&pid_fe07#6&abc"));
}

#[test]
fn test_rejects_wrong_separator() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert!(!signature.matches(r"\\?\USB#VID_1A86#PID_FE07#6&abc"));
    assert!(!signature.matches(r"\\?\USB#VID_1A86_PID_FE07#6&abc"));
}

#[test]
fn test_rejects_truncated_digits() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert!(!signature.matches(r"\\?\USB#VID_1A86&PID_FE0#6&abc"));
    assert!(!signature.matches(r"\\?\USB#VID_A86&PID_FE07#6&abc"));
}

#[test]
fn test_rejects_empty_path() {
    let signature = DeviceSignature::new(0x1A86, 0xFE07);
    assert!(!signature.matches(""));
}
