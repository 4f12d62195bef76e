// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

//! # Devnotify HID Watch Library
//!
//! This library keeps a live handle to one USB HID device across
//! hot-plug cycles, including:
//! - OS device-change notification subscription
//! - Vendor/product interface-path filtering
//! - Connection management with bounded open retry
//! - Status reporting to a pluggable sink

pub mod constants;
pub mod hotplug;
#[cfg(target_os = "windows")]
mod hotplug_windows;
pub mod manager;
pub mod signature;
pub mod status;
pub mod transport;

// Re-export commonly used types
pub use constants::*;
pub use hotplug::{decode_device_change, DeviceEvent, HotplugWatcher, SubscriptionError};
pub use manager::{ConnectionManager, ConnectionState, RetryBudget};
pub use signature::DeviceSignature;
pub use status::{LogSink, StatusSink, StatusUpdate};
pub use transport::{CloseError, HidApiTransport, HidTransport, IoError, OpenError};
