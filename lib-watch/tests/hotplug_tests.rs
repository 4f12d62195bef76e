// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use devnotify_hid::{
    decode_device_change, DeviceEvent, DBT_DEVICEARRIVAL, DBT_DEVICEREMOVECOMPLETE,
    DBT_DEVTYP_DEVICEINTERFACE,
};

const PATH: &str = r"\\?\USB#VID_1A86&PID_FE07#6&abc#{a5dcbf10-6530-11d2-901f-00c04fb951ed}";

#[test]
fn test_decode_arrival() {
    let event = decode_device_change(DBT_DEVICEARRIVAL, DBT_DEVTYP_DEVICEINTERFACE, PATH);

    assert_eq!(
        event,
        Some(DeviceEvent::Arrived {
            path: PATH.to_string()
        })
    );
}

#[test]
fn test_decode_removal() {
    let event = decode_device_change(DBT_DEVICEREMOVECOMPLETE, DBT_DEVTYP_DEVICEINTERFACE, PATH);

    assert_eq!(
        event,
        Some(DeviceEvent::Removed {
            path: PATH.to_string()
        })
    );
}

#[test]
fn test_decode_ignores_other_actions() {
    // DBT_DEVNODES_CHANGED and friends carry no interface path worth acting on
    assert_eq!(decode_device_change(0x0007, DBT_DEVTYP_DEVICEINTERFACE, PATH), None);
    assert_eq!(decode_device_change(0x8001, DBT_DEVTYP_DEVICEINTERFACE, PATH), None);
    assert_eq!(decode_device_change(0, DBT_DEVTYP_DEVICEINTERFACE, PATH), None);
}

#[test]
fn test_decode_ignores_other_device_types() {
    // DBT_DEVTYP_VOLUME
    assert_eq!(decode_device_change(DBT_DEVICEARRIVAL, 2, PATH), None);
    assert_eq!(decode_device_change(DBT_DEVICEREMOVECOMPLETE, 0, PATH), None);
}

#[test]
fn test_event_path_accessor() {
    let arrived = DeviceEvent::Arrived {
        path: PATH.to_string(),
    };
    let removed = DeviceEvent::Removed {
        path: PATH.to_string(),
    };

    assert_eq!(arrived.path(), PATH);
    assert_eq!(removed.path(), PATH);
}

#[cfg(not(target_os = "windows"))]
#[test]
fn test_subscribe_unsupported_off_windows() {
    use devnotify_hid::{HotplugWatcher, SubscriptionError};

    match HotplugWatcher::subscribe() {
        Err(SubscriptionError::Unsupported) => {}
        Err(e) => panic!("expected Unsupported, got {:?}", e),
        Ok(_) => panic!("expected Unsupported, got a watcher"),
    }
}
