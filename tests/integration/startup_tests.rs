//! Integration tests: AppService bring-up sequence against mock ports.

use noticeboard::app::events::LinkEvent;
use noticeboard::app::ports::{ConnectivityError, MessagingError};
use noticeboard::app::service::AppService;
use noticeboard::config::SystemConfig;
use noticeboard::retry::RetryPolicy;
use noticeboard::{Error, Result};

use crate::mock_ports::{DisplayCall, MockBroker, MockClock, MockDisplay, MockNet, RecordingSink};

const CLIENT_ID: &str = "noticeboard-ABCDEFGHIJ";

struct Rig {
    service: AppService,
    net: MockNet,
    broker: MockBroker,
    display: MockDisplay,
    clock: MockClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(config: SystemConfig) -> Self {
        Self {
            service: AppService::new(config),
            net: MockNet::new(),
            broker: MockBroker::new(),
            display: MockDisplay::new(),
            clock: MockClock::new(),
            sink: RecordingSink::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        self.service.run_startup(
            &mut self.net,
            &mut self.broker,
            &mut self.display,
            &mut self.clock,
            &mut self.sink,
            CLIENT_ID,
        )
    }
}

#[test]
fn happy_path_runs_the_full_chain() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.net.connect_after_polls = 2;
    rig.net.ip_after_polls = 1;

    rig.run().unwrap();

    assert!(rig.net.join_requested);
    assert_eq!(rig.broker.connected_as.as_deref(), Some(CLIENT_ID));
    assert_eq!(rig.broker.subscriptions, ["noticeboard/rx"]);
    assert_eq!(
        rig.broker.published,
        [("noticeboard/tx".to_string(), b"online".to_vec(), true)]
    );
    // The panel walks through the status lines and ends on the last one.
    assert_eq!(
        rig.display.calls[..2],
        [
            DisplayCall::Clear,
            DisplayCall::Text("connect to AP...".to_string())
        ]
    );
    assert_eq!(rig.display.current_text(), "Subscribe...");
}

#[test]
fn events_are_emitted_in_lifecycle_order() {
    let mut rig = Rig::new(SystemConfig::default());

    rig.run().unwrap();

    let kinds: Vec<&'static str> = rig
        .sink
        .events
        .iter()
        .map(|e| match e {
            LinkEvent::ApConnecting { .. } => "ap_connecting",
            LinkEvent::ApConnected { .. } => "ap_connected",
            LinkEvent::BrokerConnecting { .. } => "broker_connecting",
            LinkEvent::BrokerConnected { .. } => "broker_connected",
            LinkEvent::Subscribed { .. } => "subscribed",
            LinkEvent::PresencePublished { .. } => "presence",
            LinkEvent::MessageReceived { .. } => "message",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "ap_connecting",
            "ap_connected",
            "broker_connecting",
            "broker_connected",
            "subscribed",
            "presence",
        ]
    );
}

#[test]
fn join_loop_waits_until_connected() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.net.connect_after_polls = 5;

    rig.run().unwrap();

    // Five "not yet" polls, then the one that reports connected.
    assert_eq!(rig.net.status_polls, 6);
    assert!(rig.clock.sleeps.len() >= 5);
    assert_eq!(rig.clock.sleeps[0], 1000);
    // Backoff never shrinks.
    for pair in rig.clock.sleeps.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
}

#[test]
fn address_loop_waits_until_a_lease_arrives() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.net.ip_after_polls = 4;

    rig.run().unwrap();

    assert_eq!(rig.net.ip_polls, 5);
}

#[test]
fn address_loop_retries_through_errors() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.net.ip_errors_first = 3;
    rig.net.ip_after_polls = 1;

    rig.run().unwrap();

    assert_eq!(rig.net.ip_polls, 5);
    assert_eq!(rig.broker.subscriptions, ["noticeboard/rx"]);
}

#[test]
fn broker_connect_error_never_reaches_subscribe() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.broker.fail_connect = true;

    let err = rig.run().unwrap_err();

    assert_eq!(err, Error::Messaging(MessagingError::ConnectFailed));
    assert!(rig.broker.subscriptions.is_empty());
    assert!(rig.broker.published.is_empty());
    assert!(
        !rig.sink
            .events
            .iter()
            .any(|e| matches!(e, LinkEvent::Subscribed { .. })),
        "no subscription event after a failed connect"
    );
}

#[test]
fn subscribe_error_stops_before_presence() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.broker.fail_subscribe = true;

    let err = rig.run().unwrap_err();

    assert_eq!(err, Error::Messaging(MessagingError::SubscribeFailed));
    assert!(rig.broker.published.is_empty());
}

#[test]
fn bounded_join_policy_times_out() {
    let mut config = SystemConfig::default();
    config.ap_retry = RetryPolicy {
        initial_interval_ms: 10,
        max_interval_ms: 40,
        max_attempts: Some(3),
    };
    let mut rig = Rig::new(config);
    rig.net.connect_after_polls = 100;

    let err = rig.run().unwrap_err();

    assert_eq!(
        err,
        Error::Connectivity(ConnectivityError::JoinTimedOut { attempts: 3 })
    );
    assert_eq!(rig.clock.sleeps, [10, 20, 40]);
    // The chain stopped before the broker stage.
    assert!(rig.broker.connected_as.is_none());
}

#[test]
fn bounded_address_policy_times_out() {
    let mut config = SystemConfig::default();
    config.ip_retry = RetryPolicy {
        initial_interval_ms: 10,
        max_interval_ms: 10,
        max_attempts: Some(2),
    };
    let mut rig = Rig::new(config);
    rig.net.ip_after_polls = 100;

    let err = rig.run().unwrap_err();

    assert_eq!(
        err,
        Error::Connectivity(ConnectivityError::AddressTimedOut { attempts: 2 })
    );
    assert!(rig.broker.connected_as.is_none());
}
