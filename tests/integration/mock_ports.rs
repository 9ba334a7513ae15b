//! Mock port implementations for integration tests.
//!
//! Record every call so tests can assert on the full bring-up sequence
//! without touching real peripherals.

use core::net::Ipv4Addr;

use noticeboard::app::events::LinkEvent;
use noticeboard::app::ports::{
    ClockPort, ConnectivityError, ConnectivityPort, DisplayError, DisplayPort, EventSink,
    MessagingError, MessagingPort,
};

// ── Display ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Clear,
    DefineGlyph(u8, [u8; 8]),
    Text(String),
    Glyph(u8),
}

#[derive(Default)]
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written since the last clear.
    pub fn current_text(&self) -> String {
        let tail = self
            .calls
            .iter()
            .rposition(|c| *c == DisplayCall::Clear)
            .map_or(0, |i| i + 1);
        let mut out = String::new();
        for call in &self.calls[tail..] {
            if let DisplayCall::Text(t) = call {
                out.push_str(t);
            }
        }
        out
    }

    /// Calls recorded after the last clear.
    pub fn calls_since_clear(&self) -> &[DisplayCall] {
        let tail = self
            .calls
            .iter()
            .rposition(|c| *c == DisplayCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[tail..]
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.fail_writes {
            return Err(DisplayError::Bus);
        }
        self.calls.push(DisplayCall::Clear);
        Ok(())
    }

    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError> {
        if self.fail_writes {
            return Err(DisplayError::Bus);
        }
        self.calls.push(DisplayCall::DefineGlyph(slot, bitmap));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        if self.fail_writes {
            return Err(DisplayError::Bus);
        }
        self.calls.push(DisplayCall::Text(text.to_string()));
        Ok(())
    }

    fn write_glyph(&mut self, slot: u8) -> Result<(), DisplayError> {
        if self.fail_writes {
            return Err(DisplayError::Bus);
        }
        self.calls.push(DisplayCall::Glyph(slot));
        Ok(())
    }
}

// ── Connectivity ──────────────────────────────────────────────

pub struct MockNet {
    pub join_requested: bool,
    pub status_polls: u32,
    pub ip_polls: u32,
    /// Status polls that report "not connected" before the link comes up.
    pub connect_after_polls: u32,
    /// Address polls that report no lease before one arrives.
    pub ip_after_polls: u32,
    /// Leading address polls that fail outright before reporting anything.
    pub ip_errors_first: u32,
}

#[allow(dead_code)]
impl MockNet {
    pub fn new() -> Self {
        Self {
            join_requested: false,
            status_polls: 0,
            ip_polls: 0,
            connect_after_polls: 0,
            ip_after_polls: 0,
            ip_errors_first: 0,
        }
    }
}

impl ConnectivityPort for MockNet {
    fn begin_join(&mut self) -> Result<(), ConnectivityError> {
        self.join_requested = true;
        Ok(())
    }

    fn poll_connected(&mut self) -> Result<bool, ConnectivityError> {
        self.status_polls += 1;
        Ok(self.status_polls > self.connect_after_polls)
    }

    fn poll_ip(&mut self) -> Result<Option<Ipv4Addr>, ConnectivityError> {
        self.ip_polls += 1;
        if self.ip_polls <= self.ip_errors_first {
            return Err(ConnectivityError::Platform(-1));
        }
        if self.ip_polls > self.ip_errors_first + self.ip_after_polls {
            Ok(Some(Ipv4Addr::new(10, 0, 0, 7)))
        } else {
            Ok(None)
        }
    }
}

// ── Messaging ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockBroker {
    pub fail_connect: bool,
    pub fail_subscribe: bool,
    pub connected_as: Option<String>,
    pub subscriptions: Vec<String>,
    pub published: Vec<(String, Vec<u8>, bool)>,
}

#[allow(dead_code)]
impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessagingPort for MockBroker {
    fn connect(&mut self, client_id: &str) -> Result<(), MessagingError> {
        if self.fail_connect {
            return Err(MessagingError::ConnectFailed);
        }
        self.connected_as = Some(client_id.to_string());
        Ok(())
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), MessagingError> {
        if self.connected_as.is_none() {
            return Err(MessagingError::NotConnected);
        }
        if self.fail_subscribe {
            return Err(MessagingError::SubscribeFailed);
        }
        self.subscriptions.push(topic.to_string());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), MessagingError> {
        if self.connected_as.is_none() {
            return Err(MessagingError::NotConnected);
        }
        self.published
            .push((topic.to_string(), payload.to_vec(), retain));
        Ok(())
    }
}

// ── Clock ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub sleeps: Vec<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClockPort for MockClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<LinkEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &LinkEvent) {
        self.events.push(event.clone());
    }
}
