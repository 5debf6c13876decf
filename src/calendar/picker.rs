use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, warn};

use super::{CalendarCell, CalendarDay, CalendarMonth, is_before_minimum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPicker {
    displayed: CalendarMonth,
    selected: NaiveDate,
    minimum: NaiveDate,
    /// Keyboard cursor, always inside `displayed`.
    cursor: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    Open(OpenPicker),
}

/// Modal date picker. Nothing leaves the picker until `confirm`.
#[derive(Debug, Clone, Default)]
pub struct DatePicker {
    state: PickerState,
}

impl DatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open(_))
    }

    /// Starts a fresh session. Month navigation and selection from any
    /// earlier session are discarded.
    pub fn open(&mut self, starting: impl CalendarDay, minimum: impl CalendarDay) {
        let starting = starting.calendar_day();
        let minimum = minimum.calendar_day();
        debug!(%starting, %minimum, "date picker opened");
        self.state = PickerState::Open(OpenPicker {
            displayed: CalendarMonth::containing(starting),
            selected: starting,
            minimum,
            cursor: starting,
        });
    }

    pub fn displayed_month(&self) -> Option<CalendarMonth> {
        self.open_ref().map(|open| open.displayed)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.open_ref().map(|open| open.selected)
    }

    pub fn minimum_date(&self) -> Option<NaiveDate> {
        self.open_ref().map(|open| open.minimum)
    }

    pub fn cursor(&self) -> Option<NaiveDate> {
        self.open_ref().map(|open| open.cursor)
    }

    /// Cells of the displayed month; empty while closed.
    pub fn cells(&self) -> Vec<CalendarCell> {
        self.open_ref()
            .map(|open| open.displayed.cells(open.selected, open.minimum))
            .unwrap_or_default()
    }

    /// Unbounded in both directions. The selection is left alone even when it
    /// scrolls out of view.
    pub fn navigate_month(&mut self, delta: i32) -> bool {
        let Some(open) = self.open_mut() else {
            return false;
        };
        let next = match open.displayed.shifted(delta) {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "month navigation stopped at calendar bounds");
                return false;
            }
        };
        open.displayed = next;
        let day = open.cursor.day().min(next.day_count());
        open.cursor = next.date_of(day).unwrap_or(next.first_day());
        debug!(month = %next.title(), "date picker navigated");
        true
    }

    pub fn previous_month(&mut self) -> bool {
        self.navigate_month(-1)
    }

    pub fn next_month(&mut self) -> bool {
        self.navigate_month(1)
    }

    /// Dates before the minimum are not selectable; returns whether the
    /// selection changed hands to `date`.
    pub fn select_cell(&mut self, date: impl CalendarDay) -> bool {
        let date = date.calendar_day();
        let Some(open) = self.open_mut() else {
            return false;
        };
        if is_before_minimum(date, open.minimum) {
            debug!(%date, "ignored pick before minimum date");
            return false;
        }
        open.selected = date;
        if open.displayed.contains(date) {
            open.cursor = date;
        }
        true
    }

    /// Moves the keyboard cursor by whole days, following it into the
    /// neighbouring month when it leaves the displayed one.
    pub fn move_cursor(&mut self, days: i64) -> bool {
        let Some(open) = self.open_mut() else {
            return false;
        };
        let magnitude = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            open.cursor.checked_add_days(magnitude)
        } else {
            open.cursor.checked_sub_days(magnitude)
        };
        let Some(moved) = moved else {
            return false;
        };
        open.cursor = moved;
        if !open.displayed.contains(moved) {
            open.displayed = CalendarMonth::containing(moved);
        }
        true
    }

    pub fn pick_cursor(&mut self) -> bool {
        match self.cursor() {
            Some(cursor) => self.select_cell(cursor),
            None => false,
        }
    }

    /// Emits the selection and closes. A selection left below the minimum by
    /// an early starting date is raised to the minimum.
    pub fn confirm(&mut self) -> Option<NaiveDate> {
        let PickerState::Open(open) = std::mem::take(&mut self.state) else {
            return None;
        };
        let confirmed = open.selected.max(open.minimum);
        debug!(%confirmed, "date picker confirmed");
        Some(confirmed)
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("date picker cancelled");
        }
        self.state = PickerState::Closed;
    }

    fn open_ref(&self) -> Option<&OpenPicker> {
        match &self.state {
            PickerState::Open(open) => Some(open),
            PickerState::Closed => None,
        }
    }

    fn open_mut(&mut self) -> Option<&mut OpenPicker> {
        match &mut self.state {
            PickerState::Open(open) => Some(open),
            PickerState::Closed => None,
        }
    }
}
