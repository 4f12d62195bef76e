// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use crate::constants::DEFAULT_OPEN_RETRIES;
use crate::hotplug::DeviceEvent;
use crate::signature::DeviceSignature;
use crate::status::{StatusSink, StatusUpdate};
use crate::transport::{HidTransport, IoError};
use log::debug;
use std::sync::mpsc::Receiver;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Bounded open-attempt counter for a single arrival pass
#[derive(Debug, Clone, Copy)]
pub struct RetryBudget {
    max: u32,
    spent: u32,
}

impl RetryBudget {
    pub fn new(max: u32) -> Self {
        Self { max, spent: 0 }
    }

    /// Take one attempt from the budget; false once exhausted
    pub fn spend(&mut self) -> bool {
        if self.spent < self.max {
            self.spent += 1;
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> u32 {
        self.max - self.spent
    }
}

/// Owns the device handle and drives open/close transitions from
/// filtered hot-plug events. The handle exists exactly while the state
/// is `Connected`, and a kept handle is always in non-blocking mode.
pub struct ConnectionManager<T: HidTransport, S: StatusSink> {
    transport: T,
    sink: S,
    signature: DeviceSignature,
    retry_limit: u32,
    handle: Option<T::Handle>,
}

impl<T: HidTransport, S: StatusSink> ConnectionManager<T, S> {
    pub fn new(transport: T, sink: S, signature: DeviceSignature) -> Self {
        Self::with_retry_limit(transport, sink, signature, DEFAULT_OPEN_RETRIES)
    }

    /// Construct and attempt one connect; the device may already be
    /// plugged in before watching starts. No retry loop at startup.
    pub fn with_retry_limit(
        transport: T,
        sink: S,
        signature: DeviceSignature,
        retry_limit: u32,
    ) -> Self {
        let mut manager = Self {
            transport,
            sink,
            signature,
            retry_limit,
            handle: None,
        };
        manager.attempt_open();
        manager
    }

    pub fn state(&self) -> ConnectionState {
        if self.handle.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn signature(&self) -> DeviceSignature {
        self.signature
    }

    /// Raw handle access while connected
    pub fn device(&self) -> Option<&T::Handle> {
        self.handle.as_ref()
    }

    /// Apply one hot-plug event to the connection state. Events whose
    /// path does not name the watched device are ignored entirely.
    pub fn handle_event(&mut self, event: &DeviceEvent) {
        if !self.signature.matches(event.path()) {
            return;
        }
        match event {
            DeviceEvent::Arrived { .. } => self.on_arrival(),
            DeviceEvent::Removed { .. } => self.on_removal(),
        }
    }

    /// Drive the state machine from a subscription channel until the
    /// sending side closes
    pub fn run(&mut self, events: &Receiver<DeviceEvent>) {
        while let Ok(event) = events.recv() {
            self.handle_event(&event);
        }
        debug!("Event channel closed, stopping");
    }

    /// Read from the device while connected
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        match self.handle.as_ref() {
            Some(handle) => self.transport.read(handle, buf),
            None => Err(IoError::NotConnected),
        }
    }

    /// Write to the device while connected
    pub fn write(&mut self, data: &[u8]) -> Result<usize, IoError> {
        match self.handle.as_ref() {
            Some(handle) => self.transport.write(handle, data),
            None => Err(IoError::NotConnected),
        }
    }

    fn on_arrival(&mut self) {
        if self.handle.is_some() {
            debug!("Arrival while connected, ignoring");
            return;
        }
        let mut budget = RetryBudget::new(self.retry_limit);
        while budget.spend() {
            if self.attempt_open() {
                return;
            }
        }
        debug!("Open retry budget exhausted, waiting for the next arrival");
    }

    fn on_removal(&mut self) {
        match self.handle.take() {
            Some(handle) => match self.transport.close(handle) {
                Ok(()) => self.sink.status(&StatusUpdate::Disconnected),
                // The OS side of the device is gone; the handle is not
                // worth a second close
                Err(e) => self.sink.status(&StatusUpdate::CloseFailed(e)),
            },
            None => debug!("Removal while disconnected, ignoring"),
        }
    }

    /// One open attempt. A kept handle has been switched to non-blocking
    /// mode; a handle that refuses non-blocking mode is released and the
    /// attempt counts as failed.
    fn attempt_open(&mut self) -> bool {
        match self.transport.open(self.signature) {
            Ok(handle) => match self.transport.set_nonblocking(&handle, true) {
                Ok(()) => {
                    self.handle = Some(handle);
                    self.sink.status(&StatusUpdate::Connected);
                    true
                }
                Err(e) => {
                    let _ = self.transport.close(handle);
                    self.sink.status(&StatusUpdate::OpenFailed(e));
                    false
                }
            },
            Err(e) => {
                self.sink.status(&StatusUpdate::OpenFailed(e));
                false
            }
        }
    }
}
