//! Outbound link-lifecycle events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, forward over the network,
//! etc.

use core::net::Ipv4Addr;

/// Structured events emitted by the sequencing core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// Association with the access point has started.
    ApConnecting { ssid: String },

    /// Link up with an assigned station address.
    ApConnected { ip: Ipv4Addr },

    /// Broker session establishment has started.
    BrokerConnecting { url: String },

    /// The broker acknowledged the session.
    BrokerConnected { client_id: String },

    /// The subscription was accepted by the client layer.
    Subscribed { topic: String },

    /// The retained presence announcement went out.
    PresencePublished { topic: String },

    /// A payload arrived on the subscribe topic.
    MessageReceived { topic: String, bytes: usize },
}
