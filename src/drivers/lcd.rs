//! HD44780 character-LCD driver (PCF8574 I2C backpack).
//!
//! The controller sits behind an I2C GPIO expander on a 4-bit bus: every
//! byte goes out as two nibbles, each strobed with the EN line.  Generic
//! over the `embedded-hal` bus and delay traits so the wire protocol is
//! testable against a mock bus.  `define_glyph` programs the CGRAM slots
//! the decorated render path needs.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// PCF8574 bit assignments (common backpack wiring)
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

// HD44780 instruction set
const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off, blink off
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit bus, two lines, 5x8 font
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

/// Bus failure while talking to the backpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdBusError;

impl core::fmt::Display for LcdBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "I2C write to LCD backpack failed")
    }
}

/// HD44780 behind a PCF8574 expander.
pub struct Hd44780Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C: I2c, D: DelayNs> Hd44780Lcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    /// Power-on initialisation: force 8-bit mode three times, drop to
    /// 4-bit, then configure function, display, and entry registers.
    pub fn init(&mut self) -> Result<(), LcdBusError> {
        self.delay.delay_ms(50);
        for _ in 0..3 {
            self.write_nibble(0x30, false)?;
            self.delay.delay_ms(5);
        }
        self.write_nibble(0x20, false)?;
        self.delay.delay_ms(1);
        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), LcdBusError> {
        self.command(CMD_CLEAR)?;
        // Clear is the slowest instruction on this controller.
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), LcdBusError> {
        self.command(CMD_HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor; `row` 0 or 1, `col` 0-based.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdBusError> {
        let base = if row == 0 { 0x00 } else { 0x40 };
        self.command(CMD_SET_DDRAM | (base + col))
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), LcdBusError> {
        for b in text.bytes() {
            self.write_data(b)?;
        }
        Ok(())
    }

    /// Write one raw character code (CGRAM glyphs are codes 0..=7).
    pub fn write_raw(&mut self, code: u8) -> Result<(), LcdBusError> {
        self.write_data(code)
    }

    /// Program a 5x8 glyph into CGRAM `slot` (0..=7), then return to DDRAM
    /// addressing so subsequent writes hit the panel again.
    pub fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), LcdBusError> {
        self.command(CMD_SET_CGRAM | ((slot & 0x07) << 3))?;
        for row in bitmap {
            self.write_data(row)?;
        }
        self.command(CMD_SET_DDRAM)
    }

    // ── 4-bit bus ─────────────────────────────────────────────

    fn command(&mut self, cmd: u8) -> Result<(), LcdBusError> {
        self.write_byte(cmd, false)
    }

    fn write_data(&mut self, data: u8) -> Result<(), LcdBusError> {
        self.write_byte(data, true)
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) -> Result<(), LcdBusError> {
        self.write_nibble(byte & 0xF0, is_data)?;
        self.write_nibble((byte << 4) & 0xF0, is_data)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<(), LcdBusError> {
        let rs = if is_data { RS } else { 0 };
        let frame = nibble | rs | BACKLIGHT;
        self.bus_write(frame | EN)?;
        self.delay.delay_us(1);
        self.bus_write(frame)
    }

    fn bus_write(&mut self, frame: u8) -> Result<(), LcdBusError> {
        self.i2c.write(self.addr, &[frame]).map_err(|_| LcdBusError)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
