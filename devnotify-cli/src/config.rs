// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use anyhow::{Context, Result};
use devnotify_hid::{DeviceSignature, DEFAULT_OPEN_RETRIES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Target device shipped as the built-in default (CH340 demo board)
pub const DEFAULT_VENDOR_ID: u16 = 0x1A86;
pub const DEFAULT_PRODUCT_ID: u16 = 0xFE07;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceIdentification,
    #[serde(default = "default_open_retries")]
    pub open_retries: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device identification (vendor ID, product ID)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentification {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl Default for DeviceIdentification {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_open_retries() -> u32 {
    DEFAULT_OPEN_RETRIES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceIdentification::default(),
            open_retries: default_open_retries(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| "Failed to parse YAML config")?;
        Ok(config)
    }

    /// Get the watched device signature for the HID connection
    pub fn signature(&self) -> DeviceSignature {
        DeviceSignature::new(self.device.vendor_id, self.device.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("devnotify.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "device:\n  vendor_id: 6790\n  product_id: 65031\nopen_retries: 3\nlogging:\n  level: debug\n",
        );

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.device.vendor_id, 0x1A86);
        assert_eq!(config.device.product_id, 0xFE07);
        assert_eq!(config.open_retries, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}\n");

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.device.vendor_id, DEFAULT_VENDOR_ID);
        assert_eq!(config.device.product_id, DEFAULT_PRODUCT_ID);
        assert_eq!(config.open_retries, DEFAULT_OPEN_RETRIES);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Config::from_file("/nonexistent/devnotify.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "device: [not, a, map\n");

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_signature_mapping() {
        let config = Config::default();
        assert_eq!(
            config.signature(),
            DeviceSignature::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID)
        );
    }
}
