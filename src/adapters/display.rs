//! Character-panel adapter.
//!
//! Implements [`DisplayPort`] over the HD44780 driver.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real panel on the I2C bus.
//! - **all other targets**: in-memory transcript of every operation so
//!   host tests can assert on rendered output.

use crate::app::ports::{DisplayError, DisplayPort};

/// Highest CGRAM slot the controller offers.
const MAX_GLYPH_SLOT: u8 = 7;

// ───────────────────────────────────────────────────────────────
// ESP-IDF adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct LcdDisplay {
    lcd: crate::drivers::lcd::Hd44780Lcd<
        esp_idf_hal::i2c::I2cDriver<'static>,
        esp_idf_hal::delay::Delay,
    >,
}

#[cfg(target_os = "espidf")]
impl LcdDisplay {
    /// Bring the panel up on an already-configured I2C bus.
    pub fn new(
        i2c: esp_idf_hal::i2c::I2cDriver<'static>,
        config: &crate::config::DisplayConfig,
    ) -> Result<Self, DisplayError> {
        let mut lcd = crate::drivers::lcd::Hd44780Lcd::new(
            i2c,
            esp_idf_hal::delay::Delay::new_default(),
            config.i2c_addr,
        );
        lcd.init().map_err(|_| DisplayError::Bus)?;
        log::info!(
            "display: {}x{} panel at 0x{:02X}",
            config.cols,
            config.rows,
            config.i2c_addr
        );
        Ok(Self { lcd })
    }
}

#[cfg(target_os = "espidf")]
impl DisplayPort for LcdDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd.clear().map_err(|_| DisplayError::Bus)
    }

    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError> {
        if slot > MAX_GLYPH_SLOT {
            return Err(DisplayError::InvalidGlyphSlot(slot));
        }
        self.lcd
            .define_glyph(slot, bitmap)
            .map_err(|_| DisplayError::Bus)
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.lcd.write_str(text).map_err(|_| DisplayError::Bus)
    }

    fn write_glyph(&mut self, slot: u8) -> Result<(), DisplayError> {
        if slot > MAX_GLYPH_SLOT {
            return Err(DisplayError::InvalidGlyphSlot(slot));
        }
        self.lcd.write_raw(slot).map_err(|_| DisplayError::Bus)
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation adapter (host targets)
// ───────────────────────────────────────────────────────────────

/// One recorded panel operation.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    DefineGlyph(u8, [u8; 8]),
    Text(String),
    Glyph(u8),
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct LcdDisplay {
    ops: Vec<DisplayOp>,
}

#[cfg(not(target_os = "espidf"))]
impl LcdDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full operation transcript since construction.
    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Concatenated text written since the last clear.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        let tail = self
            .ops
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |i| i + 1);
        for op in &self.ops[tail..] {
            if let DisplayOp::Text(t) = op {
                out.push_str(t);
            }
        }
        out
    }
}

#[cfg(not(target_os = "espidf"))]
impl DisplayPort for LcdDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Clear);
        Ok(())
    }

    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError> {
        if slot > MAX_GLYPH_SLOT {
            return Err(DisplayError::InvalidGlyphSlot(slot));
        }
        self.ops.push(DisplayOp::DefineGlyph(slot, bitmap));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Text(text.to_string()));
        Ok(())
    }

    fn write_glyph(&mut self, slot: u8) -> Result<(), DisplayError> {
        if slot > MAX_GLYPH_SLOT {
            return Err(DisplayError::InvalidGlyphSlot(slot));
        }
        self.ops.push(DisplayOp::Glyph(slot));
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
