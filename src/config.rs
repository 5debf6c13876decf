use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::moment::{DEFAULT_DESCRIPTION_LIMIT, SubCategoryCatalog};
use crate::otp::DEFAULT_RESEND_SECONDS;
use crate::time_slot::{DEFAULT_END_TIME, DEFAULT_START_TIME, TimeSlot};

/// Settings read from a YAML file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub description_limit: usize,
    pub default_start_time: TimeSlot,
    pub default_end_time: TimeSlot,
    pub resend_seconds: u32,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `MOMENT_LOG`.
    pub log_filter: String,
    pub log_file: PathBuf,
    pub sub_categories: SubCategoryCatalog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            default_start_time: DEFAULT_START_TIME,
            default_end_time: DEFAULT_END_TIME,
            resend_seconds: DEFAULT_RESEND_SECONDS,
            log_filter: "info".to_string(),
            log_file: PathBuf::from("moment-scheduler.log"),
            sub_categories: SubCategoryCatalog::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate().map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate().map_err(|message| Error::Config {
            path: PathBuf::from("<inline>"),
            message,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.description_limit == 0 {
            return Err("description_limit must be greater than zero".to_string());
        }
        for (field, slot) in [
            ("default_start_time", self.default_start_time),
            ("default_end_time", self.default_end_time),
        ] {
            if !slot.is_in_catalog() {
                return Err(format!("{field} `{slot}` is not a selectable time slot"));
            }
        }
        let missing = self.sub_categories.missing_categories();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|category| category.label()).collect();
            return Err(format!("sub_categories has no entries for {}", names.join(", ")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::Category;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml("{}").expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.description_limit, 100);
        assert_eq!(config.default_start_time.to_string(), "9:30AM");
        assert_eq!(config.resend_seconds, 59);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_yaml(
            "resend_seconds: 30\nlog_filter: debug\nsub_categories:\n  Wishes: [Birthday]\n  Celebration: [Promotion]\n  Motivation: [Encouragement]\n  Others: [Custom event]\n",
        )
        .expect("config");
        assert_eq!(config.resend_seconds, 30);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.sub_categories.for_category(Category::Wishes),
            ["Birthday".to_string()]
        );
    }

    #[test]
    fn off_catalog_default_time_is_rejected() {
        let err = Config::from_yaml("default_start_time: \"5:00AM\"\n").expect_err("not a slot");
        assert!(matches!(err, Error::Config { message, .. } if message.contains("default_start_time")));
    }

    #[test]
    fn malformed_time_fails_to_parse() {
        let err = Config::from_yaml("default_end_time: soon\n").expect_err("bad label");
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn incomplete_catalog_is_rejected() {
        let err = Config::from_yaml("sub_categories:\n  Wishes: [Birthday]\n").expect_err("missing");
        assert!(matches!(err, Error::Config { message, .. } if message.contains("Celebration")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(Config::from_yaml("colour: blue\n"), Err(Error::Yaml(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(
            Config::from_yaml("description_limit: 0\n"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/moment-scheduler.yaml")).expect_err("missing");
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(Config::load_or_default(None).expect("default"), Config::default());
    }
}
