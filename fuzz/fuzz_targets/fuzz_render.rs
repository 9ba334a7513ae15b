//! Fuzz target: payload render planning
//!
//! Drives arbitrary byte sequences through the payload planner and asserts
//! the plan invariants hold for any input: text segments stay within the
//! panel budget and glyphs only ever appear as the matched pair.
//!
//! cargo fuzz run fuzz_render

#![no_main]

use libfuzzer_sys::fuzz_target;
use noticeboard::render::{self, Segment};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let plan = render::plan(&text);

    for segment in &plan.segments {
        if let Segment::Text(t) = segment {
            assert!(t.len() <= render::MAX_TEXT, "text segment over budget");
        }
    }

    assert!(
        plan.glyphs.len() == 0 || plan.glyphs.len() == 2,
        "glyphs must come as a pair"
    );
});
