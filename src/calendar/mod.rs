pub mod picker;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone};
use tracing::warn;

use crate::error::{Error, Result};

pub use picker::DatePicker;

/// Header labels for a Sunday-first week.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A value that can be truncated to the calendar day it falls on.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

// ── Month ─────────────────────────────────────────────────────────────────────

/// One displayed month. `month` is zero based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    first_weekday_offset: u32,
    day_count: u32,
}

impl CalendarMonth {
    /// Months outside `0..=11` roll into the neighbouring years, so
    /// `(2024, 12)` is January 2025 and `(2024, -1)` is December 2023.
    pub fn new(year: i32, month: i32) -> Result<Self> {
        let out_of_range = || Error::DateOutOfRange { year, month };
        let year_norm = year
            .checked_add(month.div_euclid(12))
            .ok_or_else(out_of_range)?;
        let month0 = month.rem_euclid(12) as u32;
        let first_day = NaiveDate::from_ymd_opt(year_norm, month0 + 1, 1).ok_or_else(out_of_range)?;
        Ok(Self::from_first_day(first_day))
    }

    pub fn containing(date: impl CalendarDay) -> Self {
        let date = date.calendar_day();
        let first_day = date - chrono::Days::new(u64::from(date.day0()));
        Self::from_first_day(first_day)
    }

    fn from_first_day(first_day: NaiveDate) -> Self {
        // Only December of the last representable year has no successor month.
        let day_count = first_day
            .checked_add_months(Months::new(1))
            .map(|next| (next - first_day).num_days() as u32)
            .unwrap_or(31);
        Self {
            year: first_day.year(),
            month: first_day.month0(),
            first_day,
            first_weekday_offset: first_day.weekday().num_days_from_sunday(),
            day_count,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn first_weekday_offset(&self) -> u32 {
        self.first_weekday_offset
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }

    /// Header text, e.g. `"February 2024"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    pub fn contains(&self, date: impl CalendarDay) -> bool {
        let date = date.calendar_day();
        date.year() == self.year && date.month0() == self.month
    }

    pub fn shifted(&self, delta: i32) -> Result<Self> {
        let month = (self.month as i32)
            .checked_add(delta)
            .ok_or(Error::DateOutOfRange {
                year: self.year,
                month: i32::MAX,
            })?;
        Self::new(self.year, month)
    }

    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.day_count {
            return None;
        }
        self.first_day.with_day(day)
    }

    /// Leading blanks followed by one cell per day, with no trailing padding.
    pub fn grid(&self) -> Vec<CalendarCell> {
        let mut cells = Vec::with_capacity((self.first_weekday_offset + self.day_count) as usize);
        cells.extend((0..self.first_weekday_offset).map(|_| CalendarCell::blank()));
        cells.extend(
            (1..=self.day_count)
                .filter_map(|day| self.date_of(day))
                .map(CalendarCell::day),
        );
        cells
    }

    /// The grid with selection and minimum-date flags applied.
    pub fn cells(&self, selected: NaiveDate, minimum: NaiveDate) -> Vec<CalendarCell> {
        let mut cells = self.grid();
        for cell in &mut cells {
            if let Some(date) = cell.date {
                cell.is_selected = is_same_date(date, selected);
                cell.is_before_minimum = is_before_minimum(date, minimum);
            }
        }
        cells
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarCell {
    /// `None` for a leading blank.
    pub date: Option<NaiveDate>,
    pub is_selected: bool,
    pub is_before_minimum: bool,
}

impl CalendarCell {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            is_selected: false,
            is_before_minimum: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    pub fn is_selectable(&self) -> bool {
        self.date.is_some() && !self.is_before_minimum
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Grid for `(year, month)` with a zero-based month. Years chrono cannot
/// represent yield an empty grid.
pub fn build_month_grid(year: i32, month: i32) -> Vec<CalendarCell> {
    match CalendarMonth::new(year, month) {
        Ok(displayed) => displayed.grid(),
        Err(err) => {
            warn!(year, month, error = %err, "month grid requested outside supported range");
            Vec::new()
        }
    }
}

/// Day-granularity comparison; a candidate on the minimum day is allowed.
pub fn is_before_minimum(candidate: impl CalendarDay, minimum: impl CalendarDay) -> bool {
    candidate.calendar_day() < minimum.calendar_day()
}

pub fn is_same_date(a: impl CalendarDay, b: impl CalendarDay) -> bool {
    a.calendar_day() == b.calendar_day()
}

/// Form field text, `DD-MM-YYYY`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
