// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

/// Vendor/product pair identifying the watched device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSignature {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceSignature {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    /// Token embedded in OS device-interface paths for this device.
    /// Windows formats it as uppercase 4-digit hex, e.g. `VID_1A86&PID_FE07`.
    pub fn match_token(&self) -> String {
        format!("VID_{:04X}&PID_{:04X}", self.vendor_id, self.product_id)
    }

    /// Check whether a device-interface path names this device.
    /// Case-sensitive, matching the OS formatting convention.
    pub fn matches(&self, path: &str) -> bool {
        path.contains(&self.match_token())
    }
}
