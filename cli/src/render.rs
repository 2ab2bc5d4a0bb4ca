//! Plain-text rendering of notes for terminal output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use notespace::form::format_display;
use notespace::note::Note;
use notespace::zone::LocalZone;
use time::{OffsetDateTime, UtcOffset};

/// The system's local time zone, read per instant; UTC when the offset
/// cannot be determined.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemZone;

impl LocalZone for SystemZone {
    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        UtcOffset::local_offset_at(instant).unwrap_or(UtcOffset::UTC)
    }
}

/// `id  title [public]`, then the time range and content indented below.
pub fn note_block(note: &Note, zone: &dyn LocalZone) -> String {
    let mut out = format!("{}  {}", note.id, note.title);
    if note.is_public {
        out.push_str(" [public]");
    }
    if let Some((start, end)) = note.time_range() {
        let _ = write!(out, "\n    {} to {}", format_display(start, zone), format_display(end, zone));
    }
    for line in note.content.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}
