//! Wall-clock presentation: day/night phase and header/footer formatting.
//!
//! The dashboard refreshes its clock once a minute. The resulting phase
//! picks the palette and which goal panel gets the highlight; it follows
//! the local hour unless the user pins it manually.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// First hour (inclusive) of the day phase.
const DAY_START_HOUR: u32 = 6;

/// First hour (inclusive) of the night phase.
const NIGHT_START_HOUR: u32 = 17;

/// The dashboard's presentation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Daytime palette; the work-goals panel is highlighted.
    Day,
    /// Nighttime palette; the personal-goals panel is highlighted.
    Night,
}

impl Phase {
    /// Phase glyph for the header.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Day => "\u{2600}",
            Self::Night => "\u{263e}",
        }
    }
}

/// Manual phase override, cycled with the `d` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseOverride {
    /// Follow the wall clock.
    #[default]
    Auto,
    /// Pin the day phase.
    Day,
    /// Pin the night phase.
    Night,
}

impl PhaseOverride {
    /// Next override in the `Auto -> Day -> Night -> Auto` cycle.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::Auto => Self::Day,
            Self::Day => Self::Night,
            Self::Night => Self::Auto,
        }
    }

    /// Short label for the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }

    /// Resolves the effective phase at the given moment.
    #[must_use]
    pub fn resolve(self, moment: &DateTime<Tz>) -> Phase {
        match self {
            Self::Auto => phase_of(moment),
            Self::Day => Phase::Day,
            Self::Night => Phase::Night,
        }
    }
}

/// Phase from the wall clock: day between 06:00 and 16:59, night otherwise.
#[must_use]
pub fn phase_of(moment: &DateTime<Tz>) -> Phase {
    let hour = moment.hour();
    if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
        Phase::Day
    } else {
        Phase::Night
    }
}

/// Current moment in the configured display timezone.
#[must_use]
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Header date, e.g. `August 26, 2026`.
#[must_use]
pub fn header_date(moment: &DateTime<Tz>) -> String {
    moment.format("%B %d, %Y").to_string()
}

/// Header time, e.g. `14:05`.
#[must_use]
pub fn header_time(moment: &DateTime<Tz>) -> String {
    moment.format("%H:%M").to_string()
}

/// Footer sync label: the feed's `lastUpdated` rendered as `MM/dd HH:mm`
/// in the display timezone, or `Unknown` when absent or unparseable.
#[must_use]
pub fn last_sync_label(last_updated: Option<&str>, tz: Tz) -> String {
    last_updated
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(
            || "Unknown".to_string(),
            |stamp| stamp.with_timezone(&tz).format("%m/%d %H:%M").to_string(),
        )
}
