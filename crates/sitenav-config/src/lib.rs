//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The config carries what the navigation core needs per site: where the
//! collector reads content from, the locale setup, the theme defaults the
//! normalize walk starts from, and navigation behavior flags.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.source_dir`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use sitenav_pagemap::{ThemeOverrides, ThemeSettings};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Navigation behavior configuration.
    pub navigation: NavigationConfig,
    /// Theme defaults applied as the walk's root context.
    pub theme: ThemeConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    default_locale: Option<String>,
    locales: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Source directory the collector scans for content.
    pub source_dir: PathBuf,
    /// Site default locale, the fallback variant for lookups.
    pub default_locale: Option<String>,
    /// Locales the site serves. Empty for locale-less sites.
    pub locales: Vec<String>,
}

/// Navigation behavior configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// Whether sidebar folders start collapsed.
    pub default_menu_collapsed: bool,
}

/// Theme defaults from the config file.
///
/// Unset fields fall back to the built-in [`ThemeSettings`] defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Default for the top navigation bar.
    pub navbar: Option<bool>,
    /// Default for the sidebar.
    pub sidebar: Option<bool>,
    /// Default for the table of contents.
    pub toc: Option<bool>,
    /// Default for prev/next pagination links.
    pub pagination: Option<bool>,
    /// Default for the footer.
    pub footer: Option<bool>,
    /// Default for full-bleed page bodies.
    pub full: Option<bool>,
}

impl ThemeConfig {
    /// The config section as overrides on the built-in defaults.
    #[must_use]
    pub fn overrides(&self) -> ThemeOverrides {
        ThemeOverrides {
            navbar: self.navbar,
            sidebar: self.sidebar,
            toc: self.toc,
            pagination: self.pagination,
            footer: self.footer,
            full: self.full,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.source_dir`").
        field: String,
        /// Error message (e.g., "${`SITENAV_DOCS`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `sitenav.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, expansion fails, or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default_with_cwd())
        }
    }

    /// Theme settings the normalize walk starts from.
    #[must_use]
    pub fn theme_defaults(&self) -> ThemeSettings {
        ThemeSettings::default().apply(&self.theme.overrides())
    }

    /// Site default locale.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        self.site_resolved.default_locale.as_deref()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            navigation: NavigationConfig::default(),
            theme: ThemeConfig::default(),
            site_resolved: SiteConfig {
                source_dir: base.join("docs"),
                default_locale: None,
                locales: Vec::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_site(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.site.source_dir {
            self.site.source_dir = Some(expand::expand_env(source_dir, "site.source_dir")?);
        }
        Ok(())
    }

    /// Resolve the raw site section against the config file directory.
    fn resolve_site(&mut self, config_dir: &Path) {
        let source_dir = self.site.source_dir.as_deref().unwrap_or("docs");
        let source_dir = if Path::new(source_dir).is_absolute() {
            PathBuf::from(source_dir)
        } else {
            config_dir.join(source_dir)
        };

        self.site_resolved = SiteConfig {
            source_dir,
            default_locale: self.site.default_locale.clone(),
            locales: self.site.locales.clone().unwrap_or_default(),
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for locale in &self.site_resolved.locales {
            if locale.is_empty() {
                return Err(ConfigError::Validation(
                    "site.locales entries cannot be empty".to_owned(),
                ));
            }
        }

        if let Some(ref default_locale) = self.site_resolved.default_locale {
            if default_locale.is_empty() {
                return Err(ConfigError::Validation(
                    "site.default_locale cannot be empty".to_owned(),
                ));
            }
            if !self.site_resolved.locales.is_empty()
                && !self.site_resolved.locales.contains(default_locale)
            {
                return Err(ConfigError::Validation(format!(
                    "site.default_locale '{default_locale}' is not in site.locales"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_resolved.source_dir, Path::new(".").join("docs"));
        assert!(config.site_resolved.default_locale.is_none());
        assert!(config.site_resolved.locales.is_empty());
        assert!(!config.navigation.default_menu_collapsed);
        assert_eq!(config.theme_defaults(), ThemeSettings::default());
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_full_config() {
        let (dir, path) = write_config(
            r#"
[site]
source_dir = "content"
default_locale = "en"
locales = ["en", "fr"]

[navigation]
default_menu_collapsed = true

[theme]
toc = false
full = true
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.site_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.default_locale(), Some("en"));
        assert_eq!(config.site_resolved.locales, vec!["en", "fr"]);
        assert!(config.navigation.default_menu_collapsed);

        let theme = config.theme_defaults();
        assert!(!theme.toc);
        assert!(theme.full);
        assert!(theme.sidebar);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let (dir, path) = write_config("");

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.site_resolved.source_dir, dir.path().join("docs"));
        assert_eq!(config.theme_defaults(), ThemeSettings::default());
    }

    #[test]
    fn test_load_parse_error() {
        let (_dir, path) = write_config("site = not valid toml");

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_absolute_source_dir_kept() {
        let (_dir, path) = write_config(
            r#"
[site]
source_dir = "/srv/site/docs"
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(
            config.site_resolved.source_dir,
            PathBuf::from("/srv/site/docs")
        );
    }

    #[test]
    fn test_source_dir_env_expansion() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_CONTENT_DIR", "expanded-content");
        }
        let (dir, path) = write_config(
            r#"
[site]
source_dir = "${SITENAV_CONTENT_DIR}"
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(
            config.site_resolved.source_dir,
            dir.path().join("expanded-content")
        );
        unsafe {
            std::env::remove_var("SITENAV_CONTENT_DIR");
        }
    }

    #[test]
    fn test_validate_default_locale_must_be_listed() {
        let (_dir, path) = write_config(
            r#"
[site]
default_locale = "de"
locales = ["en", "fr"]
"#,
        );

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("de"));
    }

    #[test]
    fn test_validate_empty_locale_entry() {
        let (_dir, path) = write_config(
            r#"
[site]
locales = ["en", ""]
"#,
        );

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_locale_without_locales_list_is_valid() {
        let (_dir, path) = write_config(
            r#"
[site]
default_locale = "en"
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.default_locale(), Some("en"));
    }
}
