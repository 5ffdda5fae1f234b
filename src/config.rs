//! Configuration management for the random test filter
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Every section is optional; an empty file yields an inactive filter that
//! includes all tests.

use crate::error::{AppError, AppResult};
use crate::filter::RandomTestFilter;
use crate::grouping::GroupingStrategy;
use crate::seed::Seed;
use crate::selection::Limit;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub grouping: GroupingStrategy,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Seed and limit settings
///
/// Both are raw, unresolved values. The limit is checked by `Config::validate`
/// and again when the filter resolves; the seed is parsed leniently.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Maximum tests kept per group; absent means no truncation
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub seed: Option<SeedSetting>,
}

/// Seed as written in the config file
///
/// TOML integers are signed 64-bit, so seeds above `i64::MAX` have to be
/// written as strings. Any other value type is kept as `Other` and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SeedSetting {
    Number(i64),
    Text(String),
    Other(toml::Value),
}

impl SeedSetting {
    /// The explicit seed, or `None` if the value is malformed
    pub fn explicit_seed(&self) -> Option<Seed> {
        match self {
            Self::Number(value) => Some(Seed::from(*value)),
            Self::Text(raw) => Seed::parse_lenient(raw),
            Self::Other(value) => {
                tracing::warn!(
                    raw_seed = %value,
                    "Ignoring malformed seed, a fresh seed will be generated"
                );
                None
            }
        }
    }
}

impl FilterConfig {
    /// Explicit seed if one is configured and well-formed
    pub fn explicit_seed(&self) -> Option<Seed> {
        self.seed.as_ref().and_then(SeedSetting::explicit_seed)
    }

    /// Apply command-line / environment overrides on top of the file values
    pub fn apply_overrides(&mut self, seed: Option<&str>, limit: Option<i64>) {
        if let Some(raw) = seed {
            tracing::debug!(seed = %raw, "Seed overridden from command line or environment");
            self.seed = Some(SeedSetting::Text(raw.to_string()));
        }
        if let Some(limit) = limit {
            tracing::debug!(limit, "Limit overridden from command line or environment");
            self.limit = Some(limit);
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        // Phase 3: Validate parsed config (provides contextual reason)
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()`, but can also be called
    /// explicitly after applying overrides.
    pub fn validate(&self) -> AppResult<()> {
        Limit::resolve(self.filter.limit)?;

        if let GroupingStrategy::Container { separator } = &self.grouping
            && separator.is_empty()
        {
            return Err(AppError::Config(
                "grouping.separator must not be empty".to_string(),
            ));
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level '{}' is not one of: {}",
                self.observability.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Build the unresolved filter described by this configuration
    pub fn build_filter(&self) -> RandomTestFilter {
        RandomTestFilter::new(self.grouping.clone())
            .with_seed(self.filter.explicit_seed())
            .with_limit(self.filter.limit)
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        // Validate config before returning
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r##"
[filter]
limit = 2
seed = 42

[grouping]
strategy = "container"
separator = "#"

[observability]
log_level = "debug"
"##;

    #[test]
    fn test_config_from_str_parses_successfully() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.filter.limit, Some(2));
        assert_eq!(config.filter.seed, Some(SeedSetting::Number(42)));
        assert_eq!(
            config.grouping,
            GroupingStrategy::Container {
                separator: "#".to_string()
            }
        );
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").expect("empty config is valid");
        assert_eq!(config.filter.limit, None);
        assert_eq!(config.filter.seed, None);
        assert_eq!(config.grouping, GroupingStrategy::default());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_string_seed_parses() {
        let config = Config::from_str("[filter]\nseed = \"18446744073709551615\"")
            .expect("should parse config");
        assert_eq!(config.filter.explicit_seed(), Some(Seed::new(u64::MAX)));
    }

    #[test]
    fn test_malformed_seed_is_not_an_error() {
        let config =
            Config::from_str("[filter]\nseed = \"banana\"").expect("malformed seed is allowed");
        assert_eq!(config.filter.explicit_seed(), None);
    }

    #[test]
    fn test_non_integer_seed_is_ignored() {
        let config = Config::from_str("[filter]\nseed = 4.5").expect("malformed seed is allowed");
        assert!(matches!(config.filter.seed, Some(SeedSetting::Other(_))));
        assert_eq!(config.filter.explicit_seed(), None);
    }

    #[test]
    fn test_negative_seed_number_is_reinterpreted() {
        let config = Config::from_str("[filter]\nseed = -1").expect("should parse config");
        assert_eq!(config.filter.explicit_seed(), Some(Seed::new(u64::MAX)));
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = Config::from_str("[filter]\nlimit = -1").unwrap_err();
        assert!(matches!(err, AppError::InvalidLimit { value: -1 }));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let err = Config::from_str("[grouping]\nstrategy = \"container\"\nseparator = \"\"")
            .unwrap_err();
        assert!(err.to_string().contains("separator"), "got: {}", err);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = Config::from_str("[observability]\nlog_level = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("log_level"), "got: {}", err);
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let err = Config::from_str("[grouping]\nstrategy = \"random\"").unwrap_err();
        assert!(matches!(err, AppError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = Config::from_str(TEST_CONFIG).expect("should parse config");
        config.filter.apply_overrides(Some("7"), Some(5));
        assert_eq!(config.filter.explicit_seed(), Some(Seed::new(7)));
        assert_eq!(config.filter.limit, Some(5));
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut config = Config::from_str(TEST_CONFIG).expect("should parse config");
        config.filter.apply_overrides(None, None);
        assert_eq!(config.filter.explicit_seed(), Some(Seed::new(42)));
        assert_eq!(config.filter.limit, Some(2));
    }

    #[test]
    fn test_filter_from_config_resolves_with_configured_seed() {
        use crate::model::TestIdentifier;

        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        let filter = config
            .build_filter()
            .resolve(vec![
                TestIdentifier::from("Suite#a"),
                TestIdentifier::from("Suite#b"),
                TestIdentifier::from("Suite#c"),
            ])
            .expect("should resolve");
        assert_eq!(filter.seed(), Seed::new(42));
        assert_eq!(filter.summary().selected, 2);
    }
}
