//! Configuration for the markup engine's read paths.
//!
//! The engine itself takes options per invocation and holds no global state;
//! this crate loads those options from a TOML file so hosts and the CLI can
//! share one configuration surface. Regex compilation happens here, keeping
//! the engine infallible.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use stgy_markup_engine::{CutoffBudget, DEFAULT_GRID_MAX, RewriteRule, UrlRewriteOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid URL rewrite pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub cutoff: Option<CutoffConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaConfig {
    #[serde(default)]
    pub allowed_prefixes: Vec<String>,
    #[serde(default)]
    pub fallback_url: String,
    pub max_objects: Option<usize>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub replacement: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub max_elements: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_GRID_MAX,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CutoffConfig {
    pub max_len: Option<i64>,
    pub max_height: Option<i64>,
    pub img_len: Option<i64>,
    pub img_height: Option<i64>,
}

impl Config {
    /// Loads a config file; an absent file is `Ok(None)`, not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Compiles the `[media]` table into engine options.
    pub fn url_rewrite_options(
        &self,
        use_thumbnail: bool,
    ) -> Result<UrlRewriteOptions, ConfigError> {
        let mut rules = Vec::with_capacity(self.media.rules.len());
        for rule in &self.media.rules {
            let mut compiled = RewriteRule::new(&rule.pattern, &rule.replacement).map_err(
                |source| ConfigError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                },
            )?;
            if let Some(thumb) = &rule.thumbnail {
                compiled = compiled.with_thumbnail(thumb);
            }
            rules.push(compiled);
        }
        Ok(UrlRewriteOptions {
            allowed_prefixes: self.media.allowed_prefixes.clone(),
            rules,
            fallback_url: self.media.fallback_url.clone(),
            use_thumbnail,
            max_objects: self.media.max_objects,
        })
    }

    pub fn cutoff_budget(&self) -> Option<CutoffBudget> {
        self.cutoff.as_ref().map(|c| {
            let defaults = CutoffBudget::default();
            CutoffBudget {
                max_len: c.max_len,
                max_height: c.max_height,
                img_len: c.img_len.unwrap_or(defaults.img_len),
                img_height: c.img_height.unwrap_or(defaults.img_height),
            }
        })
    }

    pub fn grid_max_elements(&self) -> usize {
        self.grid.max_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    const EXAMPLE: &str = r#"
[media]
allowed_prefixes = ["/images/", "https://"]
fallback_url = "/static/missing.png"
max_objects = 8

[[media.rules]]
pattern = '/images/(.*)/masters/(.*)/([^/]+)(\.[^/]+)?'
replacement = 'https://media.stgy.example/$1/masters/$2/$3$4'
thumbnail = '/images/$1/thumbs/$2$3_image.webp'

[grid]
max_elements = 4

[cutoff]
max_len = 400
img_len = 100
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_config() {
        let file = write_config(EXAMPLE);
        let config = Config::load_from_path(file.path()).unwrap().unwrap();
        assert_eq!(config.media.allowed_prefixes.len(), 2);
        assert_eq!(config.grid_max_elements(), 4);
        let budget = config.cutoff_budget().unwrap();
        assert_eq!(budget.max_len, Some(400));
        assert_eq!(budget.max_height, None);
    }

    #[test]
    fn compiles_rewrite_rules() {
        let file = write_config(EXAMPLE);
        let config = Config::load_from_path(file.path()).unwrap().unwrap();
        let opts = config.url_rewrite_options(true).unwrap();
        assert_eq!(opts.rules.len(), 1);
        assert!(opts.use_thumbnail);
        assert_eq!(opts.max_objects, Some(8));
    }

    #[test]
    fn missing_file_is_none() {
        let loaded = Config::load_from_path("/nonexistent/markup.toml").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let file = write_config(
            "[[media.rules]]\npattern = '(unclosed'\nreplacement = 'x'\n",
        );
        let config = Config::load_from_path(file.path()).unwrap().unwrap();
        let err = config.url_rewrite_options(false).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let file = write_config("");
        let config = Config::load_from_path(file.path()).unwrap().unwrap();
        assert_eq!(config.grid_max_elements(), DEFAULT_GRID_MAX);
        assert!(config.cutoff_budget().is_none());
        assert!(config.media.rules.is_empty());
    }
}
