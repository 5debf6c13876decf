pub mod form;

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::time_slot::TimeRange;

pub use form::{FormOutcome, MomentForm, Sheet};

pub const DEFAULT_DESCRIPTION_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Wishes,
    Celebration,
    Motivation,
    Others,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Wishes,
        Category::Celebration,
        Category::Motivation,
        Category::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Wishes => "Wishes",
            Self::Celebration => "Celebration",
            Self::Motivation => "Motivation",
            Self::Others => "Others",
        }
    }

    fn default_sub_categories(self) -> &'static [&'static str] {
        match self {
            Self::Wishes => &[
                "Birthday",
                "Work anniversary",
                "Marriage anniversary",
                "New Joinee",
                "Last day of work / farewell",
            ],
            Self::Celebration => &[
                "Promotion",
                "Achievement",
                "Work anniversary",
                "Marriage anniversary",
                "New Joinee",
            ],
            Self::Motivation => &[
                "Deadline stress",
                "Personal struggle",
                "Career guidance",
                "Encouragement",
            ],
            Self::Others => &["General moment", "Surprise moment", "Custom event"],
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-category lists keyed by category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubCategoryCatalog(IndexMap<Category, Vec<String>>);

impl Default for SubCategoryCatalog {
    fn default() -> Self {
        Self(
            Category::ALL
                .iter()
                .map(|category| {
                    let items = category
                        .default_sub_categories()
                        .iter()
                        .map(|item| item.to_string())
                        .collect();
                    (*category, items)
                })
                .collect(),
        )
    }
}

impl SubCategoryCatalog {
    pub fn new(entries: IndexMap<Category, Vec<String>>) -> Self {
        Self(entries)
    }

    pub fn for_category(&self, category: Category) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: Category, sub_category: &str) -> bool {
        self.for_category(category)
            .iter()
            .any(|item| item == sub_category)
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.for_category(*category).is_empty())
            .collect()
    }
}

// ── Draft ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentDraft {
    pub category: Category,
    /// Empty until picked; always one of the category's sub-categories.
    pub sub_category: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    MissingSubCategory,
    EmptyTimeRange,
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSubCategory => f.write_str("no sub category selected"),
            Self::EmptyTimeRange => f.write_str("end time is not after start time"),
        }
    }
}

impl MomentDraft {
    /// Advisory only. Submission is never blocked on these.
    pub fn issues(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.sub_category.is_empty() {
            issues.push(DraftIssue::MissingSubCategory);
        }
        if !self.time_range.has_duration() {
            issues.push(DraftIssue::EmptyTimeRange);
        }
        issues
    }
}
