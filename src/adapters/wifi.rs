//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`] — the boundary the sequencer polls while
//! bringing the link up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF STA driver calls via
//!   `esp_idf_svc::wifi`.
//! - **all other targets**: simulation with scriptable readiness for
//!   host-side tests.

use core::net::Ipv4Addr;

use log::info;

use crate::app::ports::{ConnectivityError, ConnectivityPort};

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() {
        return Err(ConnectivityError::NoCredentials);
    }
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        // Open network.
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct WifiAdapter {
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    /// Wrap the modem peripheral as a station.
    pub fn new(
        modem: esp_idf_hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
        ssid: &str,
        password: &str,
    ) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;

        let wifi = esp_idf_svc::wifi::EspWifi::new(modem, sysloop, Some(nvs))
            .map_err(|e| ConnectivityError::Platform(e.code()))?;

        let mut stored_ssid = heapless::String::new();
        stored_ssid
            .push_str(ssid)
            .map_err(|_| ConnectivityError::InvalidSsid)?;
        let mut stored_password = heapless::String::new();
        stored_password
            .push_str(password)
            .map_err(|_| ConnectivityError::InvalidPassword)?;

        Ok(Self {
            wifi,
            ssid: stored_ssid,
            password: stored_password,
        })
    }
}

#[cfg(target_os = "espidf")]
impl ConnectivityPort for WifiAdapter {
    fn begin_join(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
        use log::warn;

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        self.wifi
            .set_configuration(&config)
            .map_err(|e| ConnectivityError::Platform(e.code()))?;
        self.wifi
            .start()
            .map_err(|e| ConnectivityError::Platform(e.code()))?;

        // The association itself may legitimately fail on the first try
        // (AP still booting, weak signal); the polling loop retries it.
        if let Err(e) = self.wifi.connect() {
            warn!("initial association request failed: {}", e);
        }
        info!("WiFi: station started, joining '{}'", self.ssid);
        Ok(())
    }

    fn poll_connected(&mut self) -> Result<bool, ConnectivityError> {
        use log::debug;

        match self.wifi.is_connected() {
            Ok(true) => Ok(true),
            Ok(false) => {
                // Re-request association; a rejected attempt leaves the
                // driver idle until asked again.
                if let Err(e) = self.wifi.connect() {
                    debug!("re-association request: {}", e);
                }
                Ok(false)
            }
            Err(e) => Err(ConnectivityError::Platform(e.code())),
        }
    }

    fn poll_ip(&mut self) -> Result<Option<Ipv4Addr>, ConnectivityError> {
        let info = self
            .wifi
            .sta_netif()
            .get_ip_info()
            .map_err(|e| ConnectivityError::Platform(e.code()))?;
        if info.ip.is_unspecified() {
            Ok(None)
        } else {
            Ok(Some(info.ip))
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation adapter (host targets)
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct WifiAdapter {
    ssid: heapless::String<32>,
    join_started: bool,
    status_polls: u32,
    ip_polls: u32,
    /// Status polls before the simulated link reports connected.
    connect_after: u32,
    /// Address polls before the simulated lease arrives.
    ip_after: u32,
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;

        let mut stored_ssid = heapless::String::new();
        stored_ssid
            .push_str(ssid)
            .map_err(|_| ConnectivityError::InvalidSsid)?;

        Ok(Self {
            ssid: stored_ssid,
            join_started: false,
            status_polls: 0,
            ip_polls: 0,
            connect_after: 2,
            ip_after: 1,
        })
    }

    /// Script how many polls each loop takes before the link is ready.
    pub fn set_timings(&mut self, connect_after: u32, ip_after: u32) {
        self.connect_after = connect_after;
        self.ip_after = ip_after;
    }
}

#[cfg(not(target_os = "espidf"))]
impl ConnectivityPort for WifiAdapter {
    fn begin_join(&mut self) -> Result<(), ConnectivityError> {
        self.join_started = true;
        self.status_polls = 0;
        self.ip_polls = 0;
        info!("WiFi(sim): joining '{}'", self.ssid);
        Ok(())
    }

    fn poll_connected(&mut self) -> Result<bool, ConnectivityError> {
        if !self.join_started {
            return Ok(false);
        }
        self.status_polls += 1;
        Ok(self.status_polls > self.connect_after)
    }

    fn poll_ip(&mut self) -> Result<Option<Ipv4Addr>, ConnectivityError> {
        if self.status_polls <= self.connect_after {
            return Ok(None);
        }
        self.ip_polls += 1;
        if self.ip_polls > self.ip_after {
            Ok(Some(Ipv4Addr::new(192, 168, 4, 201)))
        } else {
            Ok(None)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
