//! Application service — the bring-up sequencer and message handler.
//!
//! [`AppService`] owns the connection chain: access-point association,
//! address acquisition, broker session, subscription, presence.  All I/O
//! flows through port traits injected at call sites, making the entire
//! sequence testable with mock adapters.
//!
//! ```text
//!  ConnectivityPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  MessagingPort    ──▶ │        AppService         │
//!  ClockPort        ──▶ │  join · address · broker  │
//!                       └──────────────────────────┘
//!                                   │
//!                                   ▼ DisplayPort
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::Result;
use crate::render;

use super::events::LinkEvent;
use super::ports::{
    ClockPort, ConnectivityError, ConnectivityPort, DisplayPort, EventSink, MessagingPort,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the connection chain and the render callback.
pub struct AppService {
    config: SystemConfig,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        Self { config }
    }

    // ── Bring-up sequence ─────────────────────────────────────

    /// Run the full chain: access point → address → broker → subscribe →
    /// presence.  Status lines are rendered on the panel at each stage.
    ///
    /// Returns the first fatal error; the caller decides the halt policy.
    pub fn run_startup(
        &self,
        net: &mut impl ConnectivityPort,
        broker: &mut impl MessagingPort,
        display: &mut impl DisplayPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
        client_id: &str,
    ) -> Result<()> {
        // ── Access point ──────────────────────────────────────
        render::show_status(display, "connect to AP...")?;
        sink.emit(&LinkEvent::ApConnecting {
            ssid: self.config.wifi_ssid.clone(),
        });
        info!("Connecting to '{}'", self.config.wifi_ssid);
        net.begin_join()?;

        let mut backoff = self.config.ap_retry.backoff();
        loop {
            match net.poll_connected() {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => warn!("status poll: {}", e),
            }
            let Some(delay_ms) = backoff.next() else {
                return Err(ConnectivityError::JoinTimedOut {
                    attempts: backoff.attempt(),
                }
                .into());
            };
            info!("Connection status: not connected (next poll in {} ms)", delay_ms);
            clock.sleep_ms(delay_ms);
        }
        info!("Connected.");

        let mut backoff = self.config.ip_retry.backoff();
        let ip = loop {
            match net.poll_ip() {
                Ok(Some(ip)) => break ip,
                Ok(None) => {}
                Err(e) => warn!("address poll: {}", e),
            }
            let Some(delay_ms) = backoff.next() else {
                return Err(ConnectivityError::AddressTimedOut {
                    attempts: backoff.attempt(),
                }
                .into());
            };
            clock.sleep_ms(delay_ms);
        };
        info!("{}", ip);
        sink.emit(&LinkEvent::ApConnected { ip });
        render::show_status(display, "connected AP")?;

        // ── Broker ────────────────────────────────────────────
        render::show_status(display, "Connect MQTT broker...")?;
        sink.emit(&LinkEvent::BrokerConnecting {
            url: self.config.broker_url.clone(),
        });
        info!(
            "Connecting to MQTT broker at {} as '{}'",
            self.config.broker_url, client_id
        );
        broker.connect(client_id)?;
        sink.emit(&LinkEvent::BrokerConnected {
            client_id: client_id.to_string(),
        });

        broker.subscribe(&self.config.subscribe_topic)?;
        sink.emit(&LinkEvent::Subscribed {
            topic: self.config.subscribe_topic.clone(),
        });

        // Retained presence announcement on the outbound topic, so late
        // subscribers see the board is up.
        broker.publish(&self.config.publish_topic, b"online", true)?;
        sink.emit(&LinkEvent::PresencePublished {
            topic: self.config.publish_topic.clone(),
        });

        render::show_status(display, "Subscribe...")?;
        Ok(())
    }

    // ── Inbound messages ──────────────────────────────────────

    /// Handle one broker message: log it, emit the event, render the
    /// payload.  Display failures are logged, not fatal — the session
    /// outlives a flaky panel.
    pub fn handle_message(
        &self,
        topic: &str,
        payload: &[u8],
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let text = String::from_utf8_lossy(payload);
        info!("[{}]  {}", topic, text);
        sink.emit(&LinkEvent::MessageReceived {
            topic: topic.to_string(),
            bytes: payload.len(),
        });
        if let Err(e) = render::show(display, &text) {
            warn!("render failed: {}", e);
        }
    }
}
