//! Configuration types for ACL processing.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! section and key, so an empty file is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`ResolveConfig`] - Controls the reference resolution engine.
//!
//! # Example
//!
//! ```
//! # use acl::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.resolve().max_passes(), 16);
//! assert!(!config.resolve().strict());
//! ```

use serde::Deserialize;

/// Default ceiling on full-tree resolution passes.
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Resolution configuration section.
    #[serde(default)]
    resolve: ResolveConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given resolution settings.
    pub fn new(resolve: ResolveConfig) -> Self {
        Self { resolve }
    }

    /// Returns the resolution configuration.
    pub fn resolve(&self) -> &ResolveConfig {
        &self.resolve
    }

    /// Returns a copy with strict resolution switched on or off.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.resolve.strict = strict;
        self
    }
}

/// Settings for the resolution engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveConfig {
    /// Maximum number of full-tree passes before giving up.
    #[serde(default = "default_max_passes")]
    max_passes: usize,

    /// Treat references left unresolved as errors.
    #[serde(default)]
    strict: bool,
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            strict: false,
        }
    }
}

impl ResolveConfig {
    /// Creates a new [`ResolveConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_passes` - Pass ceiling for the fixed-point loop.
    /// * `strict` - Report unresolved references as errors.
    pub fn new(max_passes: usize, strict: bool) -> Self {
        Self { max_passes, strict }
    }

    /// Returns the pass ceiling.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Returns `true` if unresolved references are errors.
    pub fn strict(&self) -> bool {
        self.strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.resolve().max_passes(), DEFAULT_MAX_PASSES);
        assert!(!config.resolve().strict());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[resolve]\nstrict = true\n").unwrap();
        assert!(config.resolve().strict());
        assert_eq!(config.resolve().max_passes(), DEFAULT_MAX_PASSES);
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig =
            toml::from_str("[resolve]\nmax_passes = 4\nstrict = false\n").unwrap();
        assert_eq!(config.resolve().max_passes(), 4);
        assert!(config.with_strict(true).resolve().strict());
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[resolve]\nmax_passes = \"many\"\n");
        assert!(result.is_err());
    }
}
