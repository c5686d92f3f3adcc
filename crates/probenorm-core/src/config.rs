//! Configuration types for probenorm.
//!
//! [`Config::load`] layers a user TOML file over the embedded defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::location::AliasLookup;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[parser]
record_separator = "\n"
field_separator  = ";"
strict           = false

[hosts]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    /// Target host → display location.
    #[serde(default)]
    pub hosts: HostAliases,
}

/// `[parser]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_record_separator")]
    pub record_separator: String,
    #[serde(default = "default_field_separator")]
    pub field_separator: String,
    /// Fail the whole batch on the first malformed record instead of
    /// dropping it.
    #[serde(default)]
    pub strict: bool,
}

fn default_record_separator() -> String { "\n".to_string() }
fn default_field_separator() -> String { ";".to_string() }

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            record_separator: default_record_separator(),
            field_separator: default_field_separator(),
            strict: false,
        }
    }
}

/// `[hosts]` section: the alias table used for location resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HostAliases(pub HashMap<String, String>);

impl HostAliases {
    pub fn insert(&mut self, target: impl Into<String>, location: impl Into<String>) {
        self.0.insert(target.into(), location.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AliasLookup for HostAliases {
    fn lookup(&self, target: &str) -> Option<String> {
        self.0.get(target).cloned()
    }
}

impl FromIterator<(String, String)> for HostAliases {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the defaults, then layer `path` on top.
    ///
    /// An explicit `path` must exist. With `None`, the per-user file at
    /// `$XDG_CONFIG_HOME/probenorm/config.toml` is used if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let source = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(user_config_path().as_path()).required(false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(source)
            .build()?
            .try_deserialize()?;

        tracing::debug!(hosts = cfg.hosts.len(), strict = cfg.parser.strict, "config loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self {
            parser: ParserConfig::default(),
            hosts: HostAliases::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("probenorm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
