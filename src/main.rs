//! Noticeboard firmware — main entry point.
//!
//! Bring-up order: logger → peripherals → display → radio → broker client,
//! then the sequencer runs the connection chain and the main thread becomes
//! the render loop.  A fatal bring-up error drops into the halt loop: the
//! error is shown on the panel and logged once a second, forever.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  LcdDisplay     WifiAdapter     MqttAdapter              │
//! │  (DisplayPort)  (Connectivity)  (MessagingPort)          │
//! │  SystemClock    LogEventSink                             │
//! │  (ClockPort)    (EventSink)                              │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           AppService (pure logic)              │      │
//! │  │  join loop · address loop · broker · render    │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc;

use anyhow::Result;
use log::{error, info};

use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use noticeboard::adapters::client_id;
use noticeboard::adapters::display::LcdDisplay;
use noticeboard::adapters::log_sink::LogEventSink;
use noticeboard::adapters::mqtt::MqttAdapter;
use noticeboard::adapters::time::SystemClock;
use noticeboard::adapters::wifi::WifiAdapter;
use noticeboard::app::ports::DisplayPort;
use noticeboard::app::service::AppService;
use noticeboard::config::SystemConfig;
use noticeboard::render;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("noticeboard v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::from_env();

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 2. Display ────────────────────────────────────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21, // SDA
        peripherals.pins.gpio22, // SCL
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let mut display = match LcdDisplay::new(i2c, &config.display) {
        Ok(d) => d,
        Err(e) => {
            // No panel to report on; log-only halt.
            error!("display init failed: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    // ── 3. Network adapters ───────────────────────────────────
    let mut wifi = match WifiAdapter::new(
        peripherals.modem,
        sysloop,
        nvs,
        &config.wifi_ssid,
        &config.wifi_password,
    ) {
        Ok(w) => w,
        Err(e) => halt(&mut display, &format!("wifi: {e}")),
    };

    let (inbound_tx, inbound_rx) = mpsc::channel();
    let mut broker = MqttAdapter::new(
        &config.broker_url,
        config.broker_connect_timeout_ms,
        inbound_tx,
    );

    let mut clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 4. Bring-up sequence ──────────────────────────────────
    let id = client_id::client_id(&config.client_id_prefix);
    let service = AppService::new(config);

    if let Err(e) = service.run_startup(
        &mut wifi,
        &mut broker,
        &mut display,
        &mut clock,
        &mut sink,
        &id,
    ) {
        halt(&mut display, &format!("{e}"));
    }

    // ── 5. Render loop ────────────────────────────────────────
    // Blocks for the program lifetime; the MQTT event thread feeds the
    // channel.
    for msg in inbound_rx.iter() {
        service.handle_message(&msg.topic, &msg.payload, &mut display, &mut sink);
    }

    Ok(())
}

/// Terminal failure: show the message on the panel, then log it once a
/// second, forever.
fn halt(display: &mut impl DisplayPort, msg: &str) -> ! {
    let _ = render::show_status(display, msg);
    loop {
        error!("{}", msg);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
