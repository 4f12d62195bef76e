// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use crate::constants::{DBT_DEVICEARRIVAL, DBT_DEVICEREMOVECOMPLETE, DBT_DEVTYP_DEVICEINTERFACE};
use std::sync::mpsc::Receiver;

/// Hot-plug event for a single device-interface path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Arrived { path: String },
    Removed { path: String },
}

impl DeviceEvent {
    /// The OS-formatted device-interface path carried by the event
    pub fn path(&self) -> &str {
        match self {
            DeviceEvent::Arrived { path } => path,
            DeviceEvent::Removed { path } => path,
        }
    }
}

/// Errors that can occur when registering for device notifications
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error("Device notifications not supported on this platform")]
    Unsupported,

    #[error("Failed to create notification window: {0}")]
    WindowCreation(String),

    #[error("Failed to register for device notifications: {0}")]
    RegistrationFailed(String),
}

/// Decode a raw device-change callback tuple into a hot-plug event.
///
/// Only arrival and removal-complete actions carrying a device-interface
/// payload produce an event; every other action or payload type is ignored.
pub fn decode_device_change(action: u32, device_type: u32, path: &str) -> Option<DeviceEvent> {
    if device_type != DBT_DEVTYP_DEVICEINTERFACE {
        return None;
    }
    match action {
        DBT_DEVICEARRIVAL => Some(DeviceEvent::Arrived {
            path: path.to_string(),
        }),
        DBT_DEVICEREMOVECOMPLETE => Some(DeviceEvent::Removed {
            path: path.to_string(),
        }),
        _ => None,
    }
}

/// OS device-notification subscription delivering decoded events over a
/// channel. The registration lives until `unsubscribe` or drop.
pub struct HotplugWatcher {
    receiver: Receiver<DeviceEvent>,
    #[cfg(target_os = "windows")]
    backend: Option<crate::hotplug_windows::WindowsBackend>,
}

impl HotplugWatcher {
    /// Register with the OS for USB device-interface change notifications
    pub fn subscribe() -> Result<Self, SubscriptionError> {
        #[cfg(target_os = "windows")]
        {
            let (backend, receiver) = crate::hotplug_windows::WindowsBackend::spawn()?;
            Ok(Self {
                receiver,
                backend: Some(backend),
            })
        }
        #[cfg(not(target_os = "windows"))]
        {
            Err(SubscriptionError::Unsupported)
        }
    }

    /// Receiver side of the decoded event stream
    pub fn events(&self) -> &Receiver<DeviceEvent> {
        &self.receiver
    }

    /// Release the OS registration and stop event delivery.
    /// Calling this more than once is a no-op.
    pub fn unsubscribe(&mut self) {
        #[cfg(target_os = "windows")]
        if let Some(backend) = self.backend.take() {
            backend.shutdown();
        }
    }
}

impl Drop for HotplugWatcher {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
