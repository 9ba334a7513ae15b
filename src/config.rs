//! System configuration parameters
//!
//! Endpoints, topics, display geometry and retry behaviour for the
//! notice-board. Credentials default to placeholders and are normally
//! overridden at build time via `NOTICEBOARD_WIFI_SSID` /
//! `NOTICEBOARD_WIFI_PASS`.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Access point ---
    /// Network name the station joins
    pub wifi_ssid: String,
    /// WPA2 passphrase; empty for an open network
    pub wifi_password: String,

    // --- Broker ---
    /// Broker endpoint, `mqtt://host:port`
    pub broker_url: String,
    /// Client-identity prefix; a random suffix is appended each boot
    pub client_id_prefix: String,
    /// Milliseconds to wait for the broker to acknowledge the session
    pub broker_connect_timeout_ms: u32,

    // --- Topics ---
    /// Presence announcements go out here
    pub publish_topic: String,
    /// Incoming messages to render arrive here
    pub subscribe_topic: String,

    // --- Display ---
    pub display: DisplayConfig,

    // --- Retry ---
    /// Polling policy for the access-point association loop
    pub ap_retry: RetryPolicy,
    /// Polling policy for the address-acquisition loop
    pub ip_retry: RetryPolicy,
}

/// Character-panel geometry and bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// I2C address of the PCF8574 backpack (0x27 or 0x3F on common modules)
    pub i2c_addr: u8,
    pub cols: u8,
    pub rows: u8,
}

impl DisplayConfig {
    /// Total character capacity of the panel.
    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Access point
            wifi_ssid: "CHANGE_ME".to_string(),
            wifi_password: "CHANGE_ME".to_string(),

            // Broker
            broker_url: "mqtt://test.mosquitto.org:1883".to_string(),
            client_id_prefix: "noticeboard".to_string(),
            broker_connect_timeout_ms: 10_000,

            // Topics
            publish_topic: "noticeboard/tx".to_string(),
            subscribe_topic: "noticeboard/rx".to_string(),

            // Display
            display: DisplayConfig {
                i2c_addr: 0x3F,
                cols: 16,
                rows: 2,
            },

            // Retry: poll forever like the reference hardware, but with
            // backoff instead of a hot 1 s loop.
            ap_retry: RetryPolicy {
                initial_interval_ms: 1000,
                max_interval_ms: 8000,
                max_attempts: None,
            },
            ip_retry: RetryPolicy {
                initial_interval_ms: 1000,
                max_interval_ms: 8000,
                max_attempts: None,
            },
        }
    }
}

impl SystemConfig {
    /// Defaults with compile-time credential overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(ssid) = option_env!("NOTICEBOARD_WIFI_SSID") {
            cfg.wifi_ssid = ssid.to_string();
        }
        if let Some(pass) = option_env!("NOTICEBOARD_WIFI_PASS") {
            cfg.wifi_password = pass.to_string();
        }
        cfg
    }
}
