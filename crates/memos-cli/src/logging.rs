use std::env;
use std::str::FromStr;

use memos_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

pub const FORMAT_ENV: &str = "MEMOS_LOG_FORMAT";
pub const LEVEL_ENV: &str = "MEMOS_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "invalid log format '{s}' (expected text, json or pretty)"
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: String,
}

impl LogSettings {
    // Environment wins over config; `RUST_LOG` wins over both at init.
    pub fn resolve(config: &LoggingConfig) -> Result<Self, String> {
        Self::resolve_with(config, |key| env::var(key).ok())
    }

    fn resolve_with(
        config: &LoggingConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let format = lookup(FORMAT_ENV).unwrap_or_else(|| config.format.clone());
        let level = lookup(LEVEL_ENV).unwrap_or_else(|| config.level.clone());
        Ok(Self {
            format: format.parse()?,
            level,
        })
    }

    pub fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter =
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))?;

        match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .try_init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn environment_overrides_config() {
        let config = LoggingConfig::default();
        let settings = LogSettings::resolve_with(&config, |key| match key {
            FORMAT_ENV => Some("json".to_string()),
            _ => None,
        })
        .expect("resolve");
        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.level, config.level);
    }

    #[test]
    fn bad_configured_format_is_reported() {
        let config = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        assert!(LogSettings::resolve_with(&config, |_| None).is_err());
    }
}
