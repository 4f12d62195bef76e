// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use devnotify_hid::{CloseError, OpenError, StatusUpdate};

#[test]
fn test_status_lines_render_canonical_messages() {
    assert_eq!(
        StatusUpdate::Connected.to_string(),
        "Device Arrival: connected"
    );
    assert_eq!(
        StatusUpdate::OpenFailed(OpenError::Open("no device".to_string())).to_string(),
        "Open HID failed"
    );
    assert_eq!(
        StatusUpdate::Disconnected.to_string(),
        "Device Removed: disconnected"
    );
    assert_eq!(
        StatusUpdate::CloseFailed(CloseError::Close("gone".to_string())).to_string(),
        "Close HID failed"
    );
}

#[test]
fn test_error_payloads_keep_their_detail() {
    let update = StatusUpdate::OpenFailed(OpenError::Open("no device".to_string()));
    match update {
        StatusUpdate::OpenFailed(e) => {
            assert_eq!(e.to_string(), "Failed to open device: no device")
        }
        _ => unreachable!(),
    }
}
