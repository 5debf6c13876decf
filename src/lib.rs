pub mod app;
pub mod calendar;
pub mod config;
pub mod error;
pub mod logging;
pub mod moment;
pub mod motion;
pub mod otp;
pub mod session;
pub mod terminal;
pub mod time_slot;
pub mod ui;
pub mod validators;
pub mod widgets;

pub use calendar::{
    CalendarCell, CalendarMonth, DatePicker, build_month_grid, format_display_date,
    is_before_minimum, is_same_date,
};
pub use config::Config;
pub use error::{Error, Result};
pub use moment::{Category, FormOutcome, MomentDraft, MomentForm, Sheet, SubCategoryCatalog};
pub use time_slot::{
    TimeRange, TimeSlot, build_time_slots, format_duration, parse_to_minutes_since_midnight,
};
