use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const SLOT_STEP_MINUTES: u16 = 30;
pub const FIRST_SLOT_MINUTES: u16 = 6 * 60;
pub const LAST_SLOT_MINUTES: u16 = 23 * 60 + 30;

const MINUTES_PER_DAY: u16 = 24 * 60;

pub const DEFAULT_START_TIME: TimeSlot = TimeSlot(9 * 60 + 30);
pub const DEFAULT_END_TIME: TimeSlot = TimeSlot(10 * 60);

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(1[0-2]|0?[1-9]):([0-5][0-9])(AM|PM)$").expect("time label pattern compiles")
});

static CATALOG: LazyLock<Vec<TimeSlot>> = LazyLock::new(|| {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_STEP_MINUTES as usize)
        .map(TimeSlot)
        .collect()
});

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// A time of day with minute precision, written as a 12-hour label with no
/// space before the meridiem (`9:30AM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u16);

impl TimeSlot {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Strict parse of `H:MMAM` / `HH:MMPM`, hour 1 to 12.
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimeLabel(label.to_string());
        let caps = LABEL_PATTERN.captures(label.trim()).ok_or_else(invalid)?;
        let hour: u16 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u16 = caps[2].parse().map_err(|_| invalid())?;
        let hour = match (&caps[3], hour) {
            ("AM", 12) => 0,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            (_, h) => h,
        };
        Ok(Self(hour * 60 + minute))
    }

    /// Accepts only labels offered by [`time_slots`].
    pub fn from_catalog(label: &str) -> Result<Self> {
        let slot = Self::parse(label).map_err(|_| Error::NotInCatalog(label.to_string()))?;
        if CATALOG.binary_search(&slot).is_ok() {
            Ok(slot)
        } else {
            Err(Error::NotInCatalog(label.to_string()))
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn label(self) -> String {
        self.to_string()
    }

    pub fn is_in_catalog(self) -> bool {
        CATALOG.binary_search(&self).is_ok()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.0 / 60;
        let minute = self.0 % 60;
        let period = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        write!(f, "{display_hour}:{minute:02}{period}")
    }
}

impl FromStr for TimeSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

// ── TimeRange ─────────────────────────────────────────────────────────────────

/// Start and end on the same day. Overnight ranges are not modelled: an end
/// at or before the start has no duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeSlot,
    pub end: TimeSlot,
}

impl TimeRange {
    pub fn new(start: TimeSlot, end: TimeSlot) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i32 {
        i32::from(self.end.minutes()) - i32::from(self.start.minutes())
    }

    pub fn has_duration(&self) -> bool {
        self.duration_minutes() > 0
    }

    pub fn duration_label(&self) -> String {
        duration_text(self.duration_minutes())
    }
}

// ── Catalog functions ─────────────────────────────────────────────────────────

/// The selectable slots, 6:00AM through 11:30PM every 30 minutes. Computed
/// once per process.
pub fn time_slots() -> &'static [TimeSlot] {
    CATALOG.as_slice()
}

pub fn build_time_slots() -> Vec<String> {
    time_slots().iter().map(|slot| slot.label()).collect()
}

/// Lenient parse used for display: anything unparseable counts as midnight.
pub fn parse_to_minutes_since_midnight(label: &str) -> u32 {
    match TimeSlot::parse(label) {
        Ok(slot) => u32::from(slot.minutes()),
        Err(_) => {
            warn!(label, "unparseable time label treated as midnight");
            0
        }
    }
}

/// `(30m)`, `(2h)` or `(1h 30m)`; empty when the end is not after the start.
pub fn format_duration(start: &str, end: &str) -> String {
    let diff = parse_to_minutes_since_midnight(end) as i32 - parse_to_minutes_since_midnight(start) as i32;
    duration_text(diff)
}

fn duration_text(diff: i32) -> String {
    if diff <= 0 {
        return String::new();
    }
    if diff < 60 {
        return format!("({diff}m)");
    }
    let hours = diff / 60;
    let minutes = diff % 60;
    if minutes == 0 {
        format!("({hours}h)")
    } else {
        format!("({hours}h {minutes}m)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_spans_six_am_to_half_past_eleven() {
        let slots = build_time_slots();
        assert_eq!(slots.len(), 36);
        assert_eq!(slots.first().map(String::as_str), Some("6:00AM"));
        assert_eq!(slots.last().map(String::as_str), Some("11:30PM"));
        assert!(slots.contains(&"12:00PM".to_string()));
        assert!(slots.contains(&"12:30PM".to_string()));
    }

    #[test]
    fn catalog_is_chronological_without_duplicates() {
        let minutes: Vec<u32> = build_time_slots()
            .iter()
            .map(|label| parse_to_minutes_since_midnight(label))
            .collect();
        assert!(minutes.windows(2).all(|pair| pair[1] - pair[0] == 30));
    }

    #[test]
    fn twelve_hour_conversion() {
        assert_eq!(parse_to_minutes_since_midnight("12:00AM"), 0);
        assert_eq!(parse_to_minutes_since_midnight("12:00PM"), 720);
        assert_eq!(parse_to_minutes_since_midnight("9:30AM"), 570);
        assert_eq!(parse_to_minutes_since_midnight("09:30AM"), 570);
        assert_eq!(parse_to_minutes_since_midnight("11:30PM"), 1410);
        assert_eq!(parse_to_minutes_since_midnight("1:05PM"), 785);
    }

    #[test]
    fn unparseable_labels_fall_back_to_zero() {
        assert_eq!(parse_to_minutes_since_midnight(""), 0);
        assert_eq!(parse_to_minutes_since_midnight("9:30"), 0);
        assert_eq!(parse_to_minutes_since_midnight("9:30 AM"), 0);
        assert_eq!(parse_to_minutes_since_midnight("13:00PM"), 0);
        assert_eq!(parse_to_minutes_since_midnight("noon"), 0);
    }

    #[test]
    fn strict_parse_reports_invalid_label() {
        assert!(matches!(
            TimeSlot::parse("25:00AM"),
            Err(Error::InvalidTimeLabel(label)) if label == "25:00AM"
        ));
        assert_eq!(TimeSlot::parse("10:15PM").map(TimeSlot::minutes).ok(), Some(22 * 60 + 15));
    }

    #[test]
    fn catalog_guard_rejects_off_grid_times() {
        assert!(TimeSlot::from_catalog("9:30AM").is_ok());
        assert!(matches!(TimeSlot::from_catalog("9:15AM"), Err(Error::NotInCatalog(_))));
        assert!(matches!(TimeSlot::from_catalog("5:30AM"), Err(Error::NotInCatalog(_))));
        assert!(matches!(TimeSlot::from_catalog("bogus"), Err(Error::NotInCatalog(_))));
    }

    #[test]
    fn labels_round_trip_through_display() {
        for label in ["12:00AM", "12:30PM", "6:00AM", "11:30PM"] {
            assert_eq!(TimeSlot::parse(label).expect("parse").to_string(), label);
        }
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration("9:30AM", "10:00AM"), "(30m)");
        assert_eq!(format_duration("9:00AM", "11:00AM"), "(2h)");
        assert_eq!(format_duration("9:00AM", "10:30AM"), "(1h 30m)");
        assert_eq!(format_duration("11:30AM", "12:00PM"), "(30m)");
    }

    #[test]
    fn no_duration_when_end_not_after_start() {
        assert_eq!(format_duration("10:00AM", "9:00AM"), "");
        assert_eq!(format_duration("10:00AM", "10:00AM"), "");
    }

    #[test]
    fn range_reports_duration() {
        let range = TimeRange::new(
            TimeSlot::parse("9:30AM").expect("start"),
            TimeSlot::parse("11:00AM").expect("end"),
        );
        assert_eq!(range.duration_minutes(), 90);
        assert_eq!(range.duration_label(), "(1h 30m)");
        assert!(!TimeRange::new(range.end, range.start).has_duration());
    }

    #[test]
    fn slot_serializes_as_label() {
        let slot = TimeSlot::parse("6:30PM").expect("slot");
        assert_eq!(serde_json::to_string(&slot).expect("json"), "\"6:30PM\"");
        let parsed: TimeSlot = serde_json::from_str("\"6:30PM\"").expect("parse");
        assert_eq!(parsed, slot);
        assert!(serde_json::from_str::<TimeSlot>("\"late\"").is_err());
    }
}
