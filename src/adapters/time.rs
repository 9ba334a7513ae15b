//! Delay adapter.
//!
//! - **`target_os = "espidf"`** — suspends the calling FreeRTOS task.
//! - **all other targets** — `std::thread::sleep` for host runs; tests use
//!   a recording mock instead.

use crate::app::ports::ClockPort;

/// Delay provider backed by the platform scheduler.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    #[cfg(target_os = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
