//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing link-lifecycle events to the logger
//! (UART / USB-CDC in production).  A broker-backed telemetry adapter would
//! implement the same trait.

use log::info;

use crate::app::events::LinkEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`LinkEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &LinkEvent) {
        match event {
            LinkEvent::ApConnecting { ssid } => {
                info!("WIFI | connecting ssid='{}'", ssid);
            }
            LinkEvent::ApConnected { ip } => {
                info!("WIFI | up ip={}", ip);
            }
            LinkEvent::BrokerConnecting { url } => {
                info!("MQTT | connecting url={}", url);
            }
            LinkEvent::BrokerConnected { client_id } => {
                info!("MQTT | connected client_id={}", client_id);
            }
            LinkEvent::Subscribed { topic } => {
                info!("MQTT | subscribed topic={}", topic);
            }
            LinkEvent::PresencePublished { topic } => {
                info!("MQTT | presence retained on topic={}", topic);
            }
            LinkEvent::MessageReceived { topic, bytes } => {
                info!("MSG  | topic={} bytes={}", topic, bytes);
            }
        }
    }
}
