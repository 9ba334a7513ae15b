//! Application core — pure sequencing logic, zero I/O.
//!
//! The bring-up chain (access point → broker → subscription) and the
//! message handler live here. All interaction with the radio, broker and
//! panel happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
