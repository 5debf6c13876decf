use chrono::NaiveDate;
use tracing::{debug, info};

use super::{Category, DEFAULT_DESCRIPTION_LIMIT, MomentDraft, SubCategoryCatalog};
use crate::calendar::DatePicker;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::time_slot::{DEFAULT_END_TIME, DEFAULT_START_TIME, TimeRange, TimeSlot};
use crate::validators::{Validator, max_chars, run_validators};

/// Bottom sheets the form can show. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    SubCategory,
    StartTime,
    EndTime,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Submitted(MomentDraft),
    Cancelled,
}

pub struct MomentForm {
    today: NaiveDate,
    catalog: SubCategoryCatalog,
    description_limit: usize,
    description_validators: Vec<Validator>,

    category: Category,
    sub_category: String,
    description: String,
    start_date: NaiveDate,
    time_range: TimeRange,

    picker: DatePicker,
    sheet: Option<Sheet>,
}

impl MomentForm {
    /// `today` doubles as the initial start date and the earliest pickable day.
    /// It is fixed when the form is built so that a `--today` override and the
    /// picker's minimum agree; a long-lived form moves it with `set_today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            catalog: SubCategoryCatalog::default(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            description_validators: vec![max_chars(DEFAULT_DESCRIPTION_LIMIT)],
            category: Category::default(),
            sub_category: String::new(),
            description: String::new(),
            start_date: today,
            time_range: TimeRange::new(DEFAULT_START_TIME, DEFAULT_END_TIME),
            picker: DatePicker::new(),
            sheet: None,
        }
    }

    pub fn from_config(config: &Config, today: NaiveDate) -> Self {
        Self::new(today)
            .with_catalog(config.sub_categories.clone())
            .with_description_limit(config.description_limit)
            .with_time_range(TimeRange::new(
                config.default_start_time,
                config.default_end_time,
            ))
    }

    pub fn with_catalog(mut self, catalog: SubCategoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self.description_validators[0] = max_chars(limit);
        self
    }

    pub fn with_description_validator(mut self, validator: Validator) -> Self {
        self.description_validators.push(validator);
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sub_category(&self) -> &str {
        &self.sub_category
    }

    pub fn sub_categories(&self) -> &[String] {
        self.catalog.for_category(self.category)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn description_limit(&self) -> usize {
        self.description_limit
    }

    /// Counter shown under the description box, e.g. `"12/100"`.
    pub fn description_counter(&self) -> String {
        format!("{}/{}", self.description.chars().count(), self.description_limit)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn duration_label(&self) -> String {
        self.time_range.duration_label()
    }

    pub fn active_sheet(&self) -> Option<Sheet> {
        self.sheet
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut DatePicker {
        &mut self.picker
    }

    // ── Field updates ─────────────────────────────────────────────────────────

    /// Always clears the sub-category, even when the new category lists the
    /// same label.
    pub fn set_category(&mut self, category: Category) {
        debug!(from = %self.category, to = %category, "category changed");
        self.category = category;
        self.sub_category.clear();
    }

    pub fn set_sub_category(&mut self, sub_category: &str) -> Result<()> {
        if !self.catalog.contains(self.category, sub_category) {
            return Err(Error::UnknownSubCategory {
                category: self.category.to_string(),
                sub_category: sub_category.to_string(),
            });
        }
        self.sub_category = sub_category.to_string();
        self.close_sheet_if(Sheet::SubCategory);
        Ok(())
    }

    /// Applies `text` only if it passes the description validators; a change
    /// past the limit is refused and the previous text kept.
    pub fn set_description(&mut self, text: &str) -> bool {
        if let Err(reason) = run_validators(&self.description_validators, text) {
            debug!(%reason, "description change refused");
            return false;
        }
        self.description = text.to_string();
        true
    }

    /// Only catalog slots can be chosen.
    pub fn set_start_time(&mut self, label: &str) -> Result<()> {
        self.time_range.start = TimeSlot::from_catalog(label)?;
        self.close_sheet_if(Sheet::StartTime);
        Ok(())
    }

    /// Only catalog slots can be chosen. An end at or before the start is
    /// accepted and just shows no duration.
    pub fn set_end_time(&mut self, label: &str) -> Result<()> {
        self.time_range.end = TimeSlot::from_catalog(label)?;
        self.close_sheet_if(Sheet::EndTime);
        Ok(())
    }

    /// Moves the earliest pickable day. Takes effect the next time the picker
    /// opens; the chosen start date is left alone.
    pub fn set_today(&mut self, today: NaiveDate) {
        debug!(from = %self.today, to = %today, "form clock advanced");
        self.today = today;
    }

    // ── Sheets ────────────────────────────────────────────────────────────────

    pub fn open_sheet(&mut self, sheet: Sheet) {
        if self.sheet == Some(Sheet::Date) && sheet != Sheet::Date {
            self.picker.cancel();
        }
        if sheet == Sheet::Date {
            self.picker.open(self.start_date, self.today);
        }
        self.sheet = Some(sheet);
    }

    pub fn close_sheet(&mut self) {
        if self.sheet == Some(Sheet::Date) {
            self.picker.cancel();
        }
        self.sheet = None;
    }

    fn close_sheet_if(&mut self, sheet: Sheet) {
        if self.sheet == Some(sheet) {
            self.close_sheet();
        }
    }

    pub fn open_date_picker(&mut self) {
        self.open_sheet(Sheet::Date);
    }

    /// Commits the picker's selection as the start date.
    pub fn confirm_date(&mut self) -> Option<NaiveDate> {
        let confirmed = self.picker.confirm()?;
        self.start_date = confirmed;
        self.sheet = None;
        Some(confirmed)
    }

    pub fn cancel_date(&mut self) {
        self.picker.cancel();
        self.close_sheet_if(Sheet::Date);
    }

    // ── Completion ────────────────────────────────────────────────────────────

    pub fn draft(&self) -> MomentDraft {
        MomentDraft {
            category: self.category,
            sub_category: self.sub_category.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            time_range: self.time_range,
        }
    }

    /// Inconsistent time ranges are not a reason to refuse submission.
    pub fn submit(&mut self) -> MomentDraft {
        self.close_sheet();
        let draft = self.draft();
        info!(
            category = %draft.category,
            sub_category = %draft.sub_category,
            start_date = %draft.start_date,
            start = %draft.time_range.start,
            end = %draft.time_range.end,
            "moment submitted"
        );
        draft
    }

    pub fn cancel(&mut self) -> FormOutcome {
        self.close_sheet();
        info!("moment creation cancelled");
        FormOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::custom;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn form() -> MomentForm {
        MomentForm::new(date(2025, 6, 10))
    }

    #[test]
    fn defaults_match_the_create_screen() {
        let form = form();
        assert_eq!(form.category(), Category::Wishes);
        assert_eq!(form.sub_category(), "");
        assert_eq!(form.start_date(), date(2025, 6, 10));
        assert_eq!(form.time_range().start.to_string(), "9:30AM");
        assert_eq!(form.time_range().end.to_string(), "10:00AM");
        assert_eq!(form.duration_label(), "(30m)");
        assert_eq!(form.description_counter(), "0/100");
    }

    #[test]
    fn category_change_clears_sub_category() {
        let mut form = form();
        form.set_sub_category("Birthday").expect("wishes sub category");
        form.set_category(Category::Celebration);
        assert_eq!(form.sub_category(), "");
    }

    #[test]
    fn category_change_clears_even_shared_labels() {
        let mut form = form();
        form.set_sub_category("Work anniversary").expect("wishes sub category");
        form.set_category(Category::Celebration);
        assert_eq!(form.sub_category(), "");
        assert!(form.sub_categories().contains(&"Work anniversary".to_string()));
    }

    #[test]
    fn sub_category_must_belong_to_category() {
        let mut form = form();
        form.set_category(Category::Motivation);
        let err = form.set_sub_category("Birthday").expect_err("not a motivation entry");
        assert!(matches!(err, Error::UnknownSubCategory { .. }));
        assert_eq!(form.sub_category(), "");
    }

    #[test]
    fn description_past_limit_is_refused() {
        let mut form = form();
        let full = "a".repeat(100);
        assert!(form.set_description(&full));
        assert!(!form.set_description(&format!("{full}b")));
        assert_eq!(form.description(), full);
        assert_eq!(form.description_counter(), "100/100");
    }

    #[test]
    fn description_limit_counts_characters() {
        let mut form = form().with_description_limit(3);
        assert!(form.set_description("日本語"));
        assert!(!form.set_description("日本語!"));
    }

    #[test]
    fn extra_description_validators_apply() {
        let mut form = form().with_description_validator(custom(
            |text| !text.contains('\n'),
            "single line only",
        ));
        assert!(!form.set_description("two\nlines"));
        assert!(form.set_description("one line"));
    }

    #[test]
    fn times_only_from_catalog() {
        let mut form = form();
        assert!(matches!(form.set_start_time("9:15AM"), Err(Error::NotInCatalog(_))));
        form.set_start_time("9:00AM").expect("slot");
        form.set_end_time("11:00AM").expect("slot");
        assert_eq!(form.duration_label(), "(2h)");
    }

    #[test]
    fn end_before_start_is_accepted_without_duration() {
        let mut form = form();
        form.set_start_time("10:00AM").expect("slot");
        form.set_end_time("9:00AM").expect("slot");
        assert_eq!(form.duration_label(), "");

        let draft = form.submit();
        assert_eq!(draft.time_range.duration_minutes(), -60);
    }

    #[test]
    fn date_is_committed_only_on_confirm() {
        let mut form = form();
        form.open_date_picker();
        assert_eq!(form.active_sheet(), Some(Sheet::Date));
        form.picker_mut().next_month();
        form.picker_mut().select_cell(date(2025, 7, 2));
        form.cancel_date();
        assert_eq!(form.start_date(), date(2025, 6, 10));
        assert_eq!(form.active_sheet(), None);

        form.open_date_picker();
        let month = form.picker().displayed_month().expect("open");
        assert_eq!(month.month(), 5);
        form.picker_mut().select_cell(date(2025, 6, 20));
        assert_eq!(form.confirm_date(), Some(date(2025, 6, 20)));
        assert_eq!(form.start_date(), date(2025, 6, 20));
        assert!(!form.picker().is_open());
    }

    #[test]
    fn picker_minimum_is_today() {
        let mut form = form();
        form.open_date_picker();
        assert!(!form.picker_mut().select_cell(date(2025, 6, 9)));
        assert_eq!(form.picker().minimum_date(), Some(date(2025, 6, 10)));
    }

    #[test]
    fn picker_minimum_follows_clock_on_reopen() {
        let mut form = form();
        form.open_date_picker();
        form.cancel_date();
        form.set_today(date(2025, 6, 12));
        assert_eq!(form.start_date(), date(2025, 6, 10));

        form.open_date_picker();
        assert_eq!(form.picker().minimum_date(), Some(date(2025, 6, 12)));
        assert!(!form.picker_mut().select_cell(date(2025, 6, 11)));
        assert_eq!(form.confirm_date(), Some(date(2025, 6, 12)));
    }

    #[test]
    fn opening_another_sheet_closes_the_picker() {
        let mut form = form();
        form.open_date_picker();
        form.open_sheet(Sheet::StartTime);
        assert!(!form.picker().is_open());
        assert_eq!(form.active_sheet(), Some(Sheet::StartTime));

        form.set_start_time("7:00AM").expect("slot");
        assert_eq!(form.active_sheet(), None);
    }

    #[test]
    fn submit_emits_completed_draft() {
        let mut form = form();
        form.set_category(Category::Celebration);
        form.set_sub_category("Promotion").expect("sub category");
        form.set_description("Well deserved");
        let draft = form.submit();
        assert_eq!(draft.category, Category::Celebration);
        assert_eq!(draft.sub_category, "Promotion");
        assert_eq!(draft.description, "Well deserved");
        assert!(draft.issues().is_empty());
    }

    #[test]
    fn cancel_reports_cancellation() {
        let mut form = form();
        form.open_date_picker();
        assert_eq!(form.cancel(), FormOutcome::Cancelled);
        assert!(!form.picker().is_open());
    }

    #[test]
    fn from_config_applies_defaults() {
        let config = Config::from_yaml(
            "description_limit: 20\ndefault_start_time: \"8:00AM\"\ndefault_end_time: \"9:30AM\"\n",
        )
        .expect("config");
        let form = MomentForm::from_config(&config, date(2025, 6, 10));
        assert_eq!(form.description_limit(), 20);
        assert_eq!(form.duration_label(), "(1h 30m)");
    }
}
