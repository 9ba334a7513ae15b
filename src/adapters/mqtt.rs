//! MQTT client adapter.
//!
//! Wraps the ESP-IDF MQTT client behind [`MessagingPort`].  The client's
//! connection object is serviced by a dedicated thread that forwards every
//! received publish into an `mpsc` channel; the main thread drains the
//! channel and renders.  `connect` blocks until the broker acknowledges the
//! session or the configured timeout elapses.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real `EspMqttClient`.
//! - **all other targets**: recording simulation for host-side tests.

#[cfg(target_os = "espidf")]
use std::sync::mpsc;

use crate::app::ports::{MessagingError, MessagingPort};

/// One message delivered by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct MqttAdapter {
    broker_url: String,
    connect_timeout_ms: u32,
    inbound: mpsc::Sender<InboundMessage>,
    client: Option<esp_idf_svc::mqtt::client::EspMqttClient<'static>>,
}

#[cfg(target_os = "espidf")]
impl MqttAdapter {
    /// Received publishes are forwarded into `inbound`.
    pub fn new(
        broker_url: &str,
        connect_timeout_ms: u32,
        inbound: mpsc::Sender<InboundMessage>,
    ) -> Self {
        Self {
            broker_url: broker_url.to_string(),
            connect_timeout_ms,
            inbound,
            client: None,
        }
    }
}

#[cfg(target_os = "espidf")]
impl MessagingPort for MqttAdapter {
    fn connect(&mut self, client_id: &str) -> Result<(), MessagingError> {
        use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration};
        use log::{error, info, warn};

        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };

        let (client, mut connection) =
            EspMqttClient::new(&self.broker_url, &conf).map_err(|e| {
                error!("MQTT client init failed: {}", e);
                MessagingError::Platform(e.code())
            })?;

        let (session_tx, session_rx) = mpsc::channel::<Result<(), MessagingError>>();
        let inbound = self.inbound.clone();

        // The connection object must be polled for the session to make
        // progress; it lives on its own thread for the program lifetime.
        std::thread::Builder::new()
            .name("mqtt-events".to_string())
            .stack_size(8192)
            .spawn(move || {
                while let Ok(event) = connection.next() {
                    match event.payload() {
                        EventPayload::Connected(_) => {
                            info!("MQTT session up");
                            let _ = session_tx.send(Ok(()));
                        }
                        EventPayload::Received { topic, data, .. } => {
                            let msg = InboundMessage {
                                topic: topic.unwrap_or_default().to_string(),
                                payload: data.to_vec(),
                            };
                            if inbound.send(msg).is_err() {
                                // Main loop is gone; stop servicing.
                                break;
                            }
                        }
                        EventPayload::Disconnected => {
                            warn!("MQTT disconnected");
                        }
                        EventPayload::Error(e) => {
                            error!("MQTT event error: {:?}", e);
                            let _ = session_tx.send(Err(MessagingError::ConnectFailed));
                        }
                        _ => {}
                    }
                }
                info!("MQTT connection closed");
            })
            .map_err(|_| MessagingError::ConnectFailed)?;

        let window = std::time::Duration::from_millis(u64::from(self.connect_timeout_ms));
        match session_rx.recv_timeout(window) {
            Ok(Ok(())) => {
                self.client = Some(client);
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(MessagingError::ConnectTimedOut),
        }
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), MessagingError> {
        use esp_idf_svc::mqtt::client::QoS;
        use log::error;

        let client = self.client.as_mut().ok_or(MessagingError::NotConnected)?;
        client
            .subscribe(topic, QoS::AtMostOnce)
            .map(|_| ())
            .map_err(|e| {
                error!("subscribe '{}' failed: {}", topic, e);
                MessagingError::Platform(e.code())
            })
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), MessagingError> {
        use esp_idf_svc::mqtt::client::QoS;
        use log::error;

        let client = self.client.as_mut().ok_or(MessagingError::NotConnected)?;
        client
            .publish(topic, QoS::AtLeastOnce, retain, payload)
            .map(|_| ())
            .map_err(|e| {
                error!("publish '{}' failed: {}", topic, e);
                MessagingError::Platform(e.code())
            })
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation adapter (host targets)
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct MqttAdapter {
    /// Scripted failure for the next `connect` call.
    pub connect_error: Option<MessagingError>,
    /// Scripted failure for the next `subscribe` call.
    pub subscribe_error: Option<MessagingError>,
    client_id: Option<String>,
    subscriptions: Vec<String>,
    published: Vec<(String, Vec<u8>, bool)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttAdapter {
    pub fn new() -> Self {
        Self {
            connect_error: None,
            subscribe_error: None,
            client_id: None,
            subscriptions: Vec::new(),
            published: Vec::new(),
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn subscriptions(&self) -> &[String] {
        &self.subscriptions
    }

    pub fn published(&self) -> &[(String, Vec<u8>, bool)] {
        &self.published
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for MqttAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl MessagingPort for MqttAdapter {
    fn connect(&mut self, client_id: &str) -> Result<(), MessagingError> {
        if let Some(e) = self.connect_error.take() {
            return Err(e);
        }
        self.client_id = Some(client_id.to_string());
        log::info!("MQTT(sim): connected as '{}'", client_id);
        Ok(())
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), MessagingError> {
        if self.client_id.is_none() {
            return Err(MessagingError::NotConnected);
        }
        if let Some(e) = self.subscribe_error.take() {
            return Err(e);
        }
        self.subscriptions.push(topic.to_string());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), MessagingError> {
        if self.client_id.is_none() {
            return Err(MessagingError::NotConnected);
        }
        self.published
            .push((topic.to_string(), payload.to_vec(), retain));
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
