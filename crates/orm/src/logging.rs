//! Structured logging setup over `tracing-subscriber`

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Enable JSON structured logging (vs plain text)
    pub json_format: bool,
    /// Enable pretty printing for development
    pub pretty_print: bool,
    /// Include file and line number information
    pub include_location: bool,
    /// Directive-style filter such as "roster_orm=debug"; overrides `level`
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create production logging configuration
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            ..Self::default()
        }
    }

    /// Create development logging configuration
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            pretty_print: true,
            include_location: true,
            ..Self::default()
        }
    }

    /// Create test logging configuration (minimal output)
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive in effect when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over the config
///
/// Logs go to stderr so that command output on stdout stays machine readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.filter_directive()))?;

    let layer = Layer::new()
        .with_writer(io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        tracing_subscriber::registry().with(filter).with(layer.json()).try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry().with(filter).with(layer.pretty()).try_init()?;
    } else {
        tracing_subscriber::registry().with(filter).with(layer).try_init()?;
    }

    tracing::debug!(
        "Logging initialized (level: {}, format: {})",
        config.level,
        if config.json_format { "JSON" } else { "text" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::production().json_format);
        assert!(LoggingConfig::development().pretty_print);
        assert_eq!(LoggingConfig::test().level, "error");
    }

    #[test]
    fn test_filter_directive_prefers_env_filter() {
        let config = LoggingConfig::default().with_level("warn");
        assert_eq!(config.filter_directive(), "warn");
        let config = config.with_env_filter("roster_orm=trace");
        assert_eq!(config.filter_directive(), "roster_orm=trace");
    }
}
