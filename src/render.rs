//! Payload rendering.
//!
//! Turns an incoming payload into a display plan: which CGRAM glyphs to
//! define and which segments to write.  One payload value is special-cased
//! to render a custom glyph pair around the text; everything else is
//! written verbatim, truncated to the panel capacity.

use heapless::{String as FixedString, Vec as FixedVec};

use crate::app::ports::{DisplayError, DisplayPort};

/// Payload that triggers the decorated rendering.
pub const DECORATED_PAYLOAD: &str = "unko";

/// 5x8 bitmaps for the decoration, programmed into CGRAM slots 0 and 1.
const GLYPH_LEFT: [u8; 8] = [0x01, 0x03, 0x04, 0x07, 0x08, 0x0F, 0x10, 0x1F];
const GLYPH_RIGHT: [u8; 8] = [0x10, 0x18, 0x04, 0x1C, 0x02, 0x1E, 0x01, 0x1F];

/// Character budget per text segment; matches a 16x2 panel.
pub const MAX_TEXT: usize = 32;

/// One write operation against the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(FixedString<MAX_TEXT>),
    Glyph(u8),
}

/// Everything required to draw one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    /// CGRAM definitions required before the segments are written.
    pub glyphs: FixedVec<(u8, [u8; 8]), 2>,
    pub segments: FixedVec<Segment, 6>,
}

/// Truncate to `MAX_TEXT` bytes on a character boundary.
fn clipped(text: &str) -> FixedString<MAX_TEXT> {
    let mut out = FixedString::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Compute the plan for `payload`.
pub fn plan(payload: &str) -> RenderPlan {
    let mut out = RenderPlan::default();
    if payload == DECORATED_PAYLOAD {
        let _ = out.glyphs.push((0, GLYPH_LEFT));
        let _ = out.glyphs.push((1, GLYPH_RIGHT));
        let _ = out.segments.push(Segment::Text(clipped("    ")));
        let _ = out.segments.push(Segment::Glyph(0));
        let _ = out.segments.push(Segment::Glyph(1));
        let _ = out.segments.push(Segment::Text(clipped(payload)));
        let _ = out.segments.push(Segment::Glyph(0));
        let _ = out.segments.push(Segment::Glyph(1));
    } else {
        let _ = out.segments.push(Segment::Text(clipped(payload)));
    }
    out
}

/// Clear the panel and draw `payload` according to its plan.
pub fn show(display: &mut impl DisplayPort, payload: &str) -> Result<(), DisplayError> {
    display.clear()?;
    let plan = plan(payload);
    for (slot, bitmap) in &plan.glyphs {
        display.define_glyph(*slot, *bitmap)?;
    }
    for segment in &plan.segments {
        match segment {
            Segment::Text(text) => display.write_text(text)?,
            Segment::Glyph(slot) => display.write_glyph(*slot)?,
        }
    }
    Ok(())
}

/// Clear the panel and write a bare status line.
pub fn show_status(display: &mut impl DisplayPort, text: &str) -> Result<(), DisplayError> {
    display.clear()?;
    display.write_text(clipped(text).as_str())
}
