//! Port traits — the hexagonal boundary between sequencing logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (radio, broker client, panel, clock, event sink)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the sequencing core never touches
//! hardware directly.

use core::fmt;
use core::net::Ipv4Addr;

use super::events::LinkEvent;

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the character panel.
pub trait DisplayPort {
    /// Blank the panel and return the cursor home.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Program a 5x8 CGRAM glyph into `slot` (0..=7).
    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError>;

    /// Write text at the cursor.
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write one previously programmed glyph at the cursor.
    fn write_glyph(&mut self, slot: u8) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (driven adapter: domain → radio)
// ───────────────────────────────────────────────────────────────

/// Station-mode radio control.
///
/// The sequencer owns the polling loops; the adapter only reports current
/// link state.
pub trait ConnectivityPort {
    /// Configure the radio and request association with the access point.
    fn begin_join(&mut self) -> Result<(), ConnectivityError>;

    /// Whether the link is up.  Called repeatedly by the join loop; the
    /// adapter may use the call to re-request association.
    fn poll_connected(&mut self) -> Result<bool, ConnectivityError>;

    /// The assigned station address, once DHCP has handed one out.
    fn poll_ip(&mut self) -> Result<Option<Ipv4Addr>, ConnectivityError>;
}

// ───────────────────────────────────────────────────────────────
// Messaging port (driven adapter: domain → broker)
// ───────────────────────────────────────────────────────────────

/// Broker session control.
pub trait MessagingPort {
    /// Open the broker session under `client_id`, blocking until the broker
    /// acknowledges or the adapter's configured timeout elapses.
    fn connect(&mut self, client_id: &str) -> Result<(), MessagingError>;

    /// Subscribe at QoS 0.
    fn subscribe(&mut self, topic: &str) -> Result<(), MessagingError>;

    /// Publish a payload, optionally retained.
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), MessagingError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → scheduler)
// ───────────────────────────────────────────────────────────────

/// Delay provider for the polling loops, injectable so tests can record
/// sleeps instead of serving them.
pub trait ClockPort {
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The sequencer emits structured [`LinkEvent`]s through this port.
/// Adapters decide where they go — the serial log today; a broker topic or
/// BLE characteristic would implement the same trait.
pub trait EventSink {
    fn emit(&mut self, event: &LinkEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConnectivityPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    /// No SSID configured.
    NoCredentials,
    /// SSID fails validation (1-32 printable ASCII bytes).
    InvalidSsid,
    /// Passphrase fails validation (8-64 bytes for WPA2, or empty for open).
    InvalidPassword,
    /// The association loop exhausted its retry policy.
    JoinTimedOut { attempts: u32 },
    /// The address loop exhausted its retry policy.
    AddressTimedOut { attempts: u32 },
    /// Underlying driver error, by platform error code.
    Platform(i32),
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::JoinTimedOut { attempts } => {
                write!(f, "not connected after {attempts} attempts")
            }
            Self::AddressTimedOut { attempts } => {
                write!(f, "no address after {attempts} attempts")
            }
            Self::Platform(code) => write!(f, "driver error {code}"),
        }
    }
}

/// Errors from [`MessagingPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingError {
    /// The broker or transport rejected the session.
    ConnectFailed,
    /// No acknowledgement within the configured window.
    ConnectTimedOut,
    /// Operation attempted before a session was established.
    NotConnected,
    /// The client layer rejected the subscription.
    SubscribeFailed,
    /// The client layer rejected the publish.
    PublishFailed,
    /// Underlying client error, by platform error code.
    Platform(i32),
}

impl fmt::Display for MessagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "broker connect failed"),
            Self::ConnectTimedOut => write!(f, "broker connect timed out"),
            Self::NotConnected => write!(f, "no broker session"),
            Self::SubscribeFailed => write!(f, "subscribe failed"),
            Self::PublishFailed => write!(f, "publish failed"),
            Self::Platform(code) => write!(f, "client error {code}"),
        }
    }
}

/// Errors from [`DisplayPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I2C write to the panel failed.
    Bus,
    /// CGRAM slot outside 0..=7.
    InvalidGlyphSlot(u8),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus write failed"),
            Self::InvalidGlyphSlot(slot) => write!(f, "glyph slot {slot} out of range"),
        }
    }
}
