// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

/// WM_DEVICECHANGE action code for a device that has been inserted
pub const DBT_DEVICEARRIVAL: u32 = 0x8000;

/// WM_DEVICECHANGE action code for a device whose removal completed
pub const DBT_DEVICEREMOVECOMPLETE: u32 = 0x8004;

/// Broadcast payload type tag for device-interface events
pub const DBT_DEVTYP_DEVICEINTERFACE: u32 = 5;

/// Open attempts per arrival event
pub const DEFAULT_OPEN_RETRIES: u32 = 5;
