//! Unified error types for the noticeboard firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! bring-up sequencer's error handling uniform. All variants are `Copy` so
//! they can be passed around the sequencing chain without allocation.

use core::fmt;

use crate::app::ports::{ConnectivityError, DisplayError, MessagingError};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The radio could not be configured or the link never came up.
    Connectivity(ConnectivityError),
    /// The broker session could not be established or used.
    Messaging(MessagingError),
    /// The character panel rejected an operation.
    Display(DisplayError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be applied.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connectivity(e) => write!(f, "wifi: {e}"),
            Self::Messaging(e) => write!(f, "mqtt: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Connectivity(e)
    }
}

impl From<MessagingError> for Error {
    fn from(e: MessagingError) -> Self {
        Self::Messaging(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
