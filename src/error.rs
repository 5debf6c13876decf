use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid time label `{0}` (expected H:MMAM or H:MMPM)")]
    InvalidTimeLabel(String),

    #[error("time `{0}` is not one of the selectable slots")]
    NotInCatalog(String),

    #[error("`{sub_category}` is not a sub category of {category}")]
    UnknownSubCategory {
        category: String,
        sub_category: String,
    },

    #[error("date out of supported range: {year}-{month}")]
    DateOutOfRange { year: i32, month: i32 },

    #[error("config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
