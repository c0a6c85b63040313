//! Recommender configuration with multi-source merging.
//!
//! Every field has a built-in default, so running without any config file
//! behaves exactly like the stock keyword table, a 0.1 threshold and five
//! similarity matches.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use pipeline::{KeywordRuleSet, Suggestion};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Project-level config file picked up from the working directory
pub const PROJECT_CONFIG_FILE: &str = "course-recs.toml";

/// Prefix for environment overrides, e.g. `COURSE_RECS_MAX_SIMILAR=3`
pub const ENV_PREFIX: &str = "COURSE_RECS_";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicit config path doesn't exist
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    /// TOML or environment value couldn't be extracted
    #[error("Failed to read configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Values parsed but make no sense together
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables for [`crate::CourseRecommender`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Similarity matches must score strictly above this
    pub similarity_threshold: f64,
    /// Maximum number of similarity matches in a result
    pub max_similar: usize,
    /// Append `fallback` when a non-empty message produced nothing
    pub fallback_enabled: bool,
    pub fallback: Vec<Suggestion>,
    /// Keyword table, checked in order
    pub rules: KeywordRuleSet,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.1,
            max_similar: 5,
            fallback_enabled: true,
            fallback: vec![
                Suggestion::new("General Skills Training", "Udemy"),
                Suggestion::new("Professional Development", "Coursera"),
            ],
            rules: KeywordRuleSet::default(),
        }
    }
}

impl RecommenderConfig {
    /// Check value ranges and the keyword table.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::Invalid(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.fallback_enabled && self.fallback.is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_enabled is set but the fallback list is empty".to_string(),
            ));
        }
        self.rules
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Configuration loader that merges multiple sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COURSE_RECS_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project file: `./course-recs.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<RecommenderConfig> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(RecommenderConfig::default()))
            .merge(Toml::file(PROJECT_CONFIG_FILE));

        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                });
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: RecommenderConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.similarity_threshold, 0.1);
        assert_eq!(config.max_similar, 5);
        assert!(config.fallback_enabled);
        assert_eq!(config.fallback.len(), 2);
        assert_eq!(config.rules.len(), 5);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_without_files_gives_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config, RecommenderConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_project_file_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                similarity_threshold = 0.25
                max_similar = 3

                [[rules]]
                topic = "welding"
                triggers = ["weld", "لحام"]

                [[rules.suggestions]]
                name = "Welding Basics"
                provider = "Udemy"
                "#,
            )?;
            jail.set_env("COURSE_RECS_MAX_SIMILAR", "2");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.similarity_threshold, 0.25);
            assert_eq!(config.max_similar, 2);
            assert_eq!(config.rules.len(), 1);
            assert_eq!(config.rules.rules()[0].suggestions[0].name, "Welding Basics");
            // Untouched fields keep their defaults
            assert_eq!(config.fallback.len(), 2);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let err = ConfigLoader::load(Some(Path::new("no/such/config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "similarity_threshold = 1.5")?;
            let err = ConfigLoader::load(Some(Path::new("custom.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }

    #[test]
    fn test_empty_fallback_needs_flag_off() {
        let mut config = RecommenderConfig::default();
        config.fallback.clear();
        assert!(config.validate().is_err());
        config.fallback_enabled = false;
        assert!(config.validate().is_ok());
    }
}
