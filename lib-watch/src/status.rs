// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use crate::transport::{CloseError, OpenError};
use log::{info, warn};
use std::fmt;

/// Connection status change reported by the manager
#[derive(Debug)]
pub enum StatusUpdate {
    Connected,
    OpenFailed(OpenError),
    Disconnected,
    CloseFailed(CloseError),
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusUpdate::Connected => write!(f, "Device Arrival: connected"),
            StatusUpdate::OpenFailed(_) => write!(f, "Open HID failed"),
            StatusUpdate::Disconnected => write!(f, "Device Removed: disconnected"),
            StatusUpdate::CloseFailed(_) => write!(f, "Close HID failed"),
        }
    }
}

/// Receiver for one-line connection status messages
pub trait StatusSink {
    fn status(&mut self, update: &StatusUpdate);
}

/// Sink that routes status lines to the log facade
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn status(&mut self, update: &StatusUpdate) {
        match update {
            StatusUpdate::Connected | StatusUpdate::Disconnected => info!("{}", update),
            StatusUpdate::OpenFailed(e) => warn!("{}: {}", update, e),
            StatusUpdate::CloseFailed(e) => warn!("{}: {}", update, e),
        }
    }
}
