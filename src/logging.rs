use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Environment variable that overrides `log_filter` from the config.
pub const LOG_ENV: &str = "MOMENT_LOG";
const FALLBACK_FILTER: &str = "info";

/// Installs the global subscriber, appending plain-text records to
/// `config.log_file` so the full-screen UI is never written over.
/// A second call is a no-op.
pub fn init(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let env_value = std::env::var(LOG_ENV).ok();
    let wanted = directive(env_value.as_deref(), &config.log_filter);
    let (filter, rejected) = match EnvFilter::try_new(&wanted) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(FALLBACK_FILTER), Some(err)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();

    if let Some(err) = rejected {
        warn!(directive = %wanted, error = %err, "invalid log filter, using `info`");
    }
    Ok(())
}

/// `MOMENT_LOG` wins when set and non-blank.
fn directive(env_value: Option<&str>, configured: &str) -> String {
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ if configured.trim().is_empty() => FALLBACK_FILTER.to_string(),
        _ => configured.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::directive;

    #[test]
    fn environment_overrides_config() {
        assert_eq!(directive(Some("moment_scheduler=trace"), "info"), "moment_scheduler=trace");
        assert_eq!(directive(Some("  "), "debug"), "debug");
        assert_eq!(directive(None, "warn"), "warn");
        assert_eq!(directive(None, ""), "info");
    }
}
