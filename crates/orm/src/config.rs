//! Projection configuration loaded from the environment

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::loading::{FetchPlanBuilder, DEFAULT_MAX_DEPTH};
use crate::logging::LoggingConfig;
use crate::mapping::MappingLevel;

/// Upper bound accepted for `max_depth`
pub const MAX_DEPTH_LIMIT: usize = 16;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Deployment environment selecting the configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Testing,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        }
    }

    /// Short name accepted by `ROSTER_ENV`
    fn alias(self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Testing => "test",
            Environment::Production => "prod",
        }
    }

    /// Demo data may only be seeded outside production
    pub fn is_safe_for_seeding(self) -> bool {
        self != Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == name || env.alias() == name)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
                expected: "development, testing or production".to_string(),
            })
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for projections, fetch planning and logging
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub environment: Environment,
    /// Level used when a caller asks for neither a level nor attributes
    pub default_level: MappingLevel,
    /// Longest accepted attribute path and deepest walked relation path
    pub max_depth: usize,
    pub log_level: String,
    pub log_json: bool,
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::development()
    }

    /// Create configuration for development
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            default_level: MappingLevel::Complete,
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: "debug".to_string(),
            log_json: false,
        }
    }

    /// Create configuration for testing
    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            default_level: MappingLevel::Complete,
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: "warn".to_string(),
            log_json: false,
        }
    }

    /// Create configuration for production
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            default_level: MappingLevel::Summary,
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: "info".to_string(),
            log_json: true,
        }
    }

    fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::testing(),
            Environment::Production => Self::production(),
        }
    }

    /// Load configuration from `ROSTER_*` environment variables
    ///
    /// `ROSTER_ENV` selects the preset; the remaining variables override it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("ROSTER_ENV") {
            Ok(env_str) => Self::for_environment(env_str.parse()?),
            Err(_) => Self::development(),
        };

        if let Ok(level) = env::var("ROSTER_DEFAULT_LEVEL") {
            config.default_level = level.parse()?;
        }

        if let Ok(depth_str) = env::var("ROSTER_MAX_DEPTH") {
            config.max_depth = depth_str.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "max_depth".to_string(),
                value: depth_str.clone(),
                expected: format!("integer between 1 and {}", MAX_DEPTH_LIMIT),
            })?;
        }

        if let Ok(log_level) = env::var("ROSTER_LOG_LEVEL") {
            config.log_level = log_level.to_lowercase();
        }

        if let Ok(json_str) = env::var("ROSTER_LOG_JSON") {
            config.log_json = parse_flag(&json_str).ok_or_else(|| ConfigError::InvalidValue {
                field: "log_json".to_string(),
                value: json_str.clone(),
                expected: "true or false".to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "max_depth".to_string(),
                value: self.max_depth.to_string(),
                expected: format!("integer between 1 and {}", MAX_DEPTH_LIMIT),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log_level".to_string(),
                value: self.log_level.clone(),
                expected: format!("one of: {}", VALID_LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Plan builder over the global registry honouring `max_depth`
    pub fn plan_builder(&self) -> FetchPlanBuilder<'static> {
        FetchPlanBuilder::new().with_max_depth(self.max_depth)
    }

    /// Logging settings derived from this configuration
    pub fn logging_config(&self) -> LoggingConfig {
        let base = match self.environment {
            Environment::Development => LoggingConfig::development(),
            Environment::Testing => LoggingConfig::test(),
            Environment::Production => LoggingConfig::production(),
        };
        base.with_level(&self.log_level).with_json(self.log_json)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "ROSTER_ENV",
        "ROSTER_DEFAULT_LEVEL",
        "ROSTER_MAX_DEPTH",
        "ROSTER_LOG_LEVEL",
        "ROSTER_LOG_JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ProjectionConfig::development().validate().is_ok());
        assert!(ProjectionConfig::testing().validate().is_ok());
        assert!(ProjectionConfig::production().validate().is_ok());
    }

    #[test]
    fn test_max_depth_bounds() {
        let mut config = ProjectionConfig::testing();
        config.max_depth = 0;
        assert!(config.validate().is_err());
        config.max_depth = MAX_DEPTH_LIMIT + 1;
        assert!(config.validate().is_err());
        config.max_depth = MAX_DEPTH_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_validation() {
        let mut config = ProjectionConfig::development();
        config.log_level = "verbose".to_string();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "log_level"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_development() {
        clear_env();
        let config = ProjectionConfig::from_env().unwrap();
        assert_eq!(config, ProjectionConfig::development());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("ROSTER_ENV", "prod");
        env::set_var("ROSTER_DEFAULT_LEVEL", "basic");
        env::set_var("ROSTER_MAX_DEPTH", "3");
        env::set_var("ROSTER_LOG_JSON", "false");

        let config = ProjectionConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.default_level, MappingLevel::Basic);
        assert_eq!(config.max_depth, 3);
        assert!(!config.log_json);
        assert_eq!(config.plan_builder().max_depth(), 3);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        env::set_var("ROSTER_DEFAULT_LEVEL", "everything");
        assert!(ProjectionConfig::from_env().is_err());

        clear_env();
        env::set_var("ROSTER_MAX_DEPTH", "deep");
        assert!(ProjectionConfig::from_env().is_err());

        clear_env();
        env::set_var("ROSTER_MAX_DEPTH", "40");
        assert!(ProjectionConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Testing);
        assert_eq!(" Production ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
        assert!(!Environment::Production.is_safe_for_seeding());
        assert!(Environment::Testing.is_safe_for_seeding());
        assert_eq!(Environment::Development.to_string(), "development");
    }
}
