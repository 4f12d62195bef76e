// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use crate::signature::DeviceSignature;
use hidapi::{HidApi, HidDevice};
use log::debug;

/// Errors that can occur while opening a device
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("HID API error: {0}")]
    Api(String),

    #[error("Failed to open device: {0}")]
    Open(String),

    #[error("Failed to set non-blocking mode: {0}")]
    Nonblocking(String),
}

/// Errors that can occur while closing a device
#[derive(Debug, thiserror::Error)]
pub enum CloseError {
    #[error("Failed to close device: {0}")]
    Close(String),
}

/// Errors that can occur on read/write passthrough
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Device not connected")]
    NotConnected,

    #[error("Failed to read from device: {0}")]
    ReadFailed(String),

    #[error("Failed to write to device: {0}")]
    WriteFailed(String),
}

/// Byte-level device access consumed by the connection manager.
/// The manager never assumes close-twice is safe; it holds at most one
/// handle at a time.
pub trait HidTransport {
    type Handle;

    fn open(&mut self, signature: DeviceSignature) -> Result<Self::Handle, OpenError>;

    fn set_nonblocking(&mut self, handle: &Self::Handle, nonblocking: bool) -> Result<(), OpenError>;

    fn read(&mut self, handle: &Self::Handle, buf: &mut [u8]) -> Result<usize, IoError>;

    fn write(&mut self, handle: &Self::Handle, data: &[u8]) -> Result<usize, IoError>;

    fn close(&mut self, handle: Self::Handle) -> Result<(), CloseError>;
}

/// Transport backed by hidapi
pub struct HidApiTransport {
    api: HidApi,
}

impl HidApiTransport {
    pub fn new() -> Result<Self, OpenError> {
        let api = HidApi::new().map_err(|e| OpenError::Api(e.to_string()))?;
        Ok(Self { api })
    }
}

impl HidTransport for HidApiTransport {
    type Handle = HidDevice;

    fn open(&mut self, signature: DeviceSignature) -> Result<HidDevice, OpenError> {
        // The cached device list predates the arrival notification
        self.api
            .refresh_devices()
            .map_err(|e| OpenError::Api(e.to_string()))?;
        self.api
            .open(signature.vendor_id, signature.product_id)
            .map_err(|e| OpenError::Open(e.to_string()))
    }

    fn set_nonblocking(&mut self, handle: &HidDevice, nonblocking: bool) -> Result<(), OpenError> {
        handle
            .set_blocking_mode(!nonblocking)
            .map_err(|e| OpenError::Nonblocking(e.to_string()))
    }

    fn read(&mut self, handle: &HidDevice, buf: &mut [u8]) -> Result<usize, IoError> {
        let size = handle
            .read(buf)
            .map_err(|e| IoError::ReadFailed(e.to_string()))?;
        debug!("HID RX: {:02x?}", &buf[..size]);
        Ok(size)
    }

    fn write(&mut self, handle: &HidDevice, data: &[u8]) -> Result<usize, IoError> {
        debug!("HID TX: {:02x?}", data);
        handle
            .write(data)
            .map_err(|e| IoError::WriteFailed(e.to_string()))
    }

    fn close(&mut self, handle: HidDevice) -> Result<(), CloseError> {
        // hidapi releases the OS handle on drop
        drop(handle);
        Ok(())
    }
}
