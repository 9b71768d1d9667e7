//! TOML configuration
//!
//! ```toml
//! [resolver]
//! max_depth = 10
//!
//! [colors]
//! brand = "§6"
//!
//! [placeholders]
//! welcome = "{brand}Welcome to {server_motd}, {player}!"
//!
//! [player]
//! name = "Steve"
//!
//! [server]
//! motd = "Lobby"
//! ```
//!
//! Every table is optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::format::{is_format_code, Palette, ESCAPE};
use crate::host::{StaticPlayer, StaticServer};
use crate::placeholder::MAX_RECURSION_DEPTH;

/// Errors that can occur when loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid format code {code:?} for color '{name}'")]
    InvalidColor { name: String, code: String },
    #[error("invalid placeholder identifier '{identifier}' (expected letters, digits, underscore)")]
    InvalidIdentifier { identifier: String },
}

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Bound on nested expansion
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    /// Extra or overriding palette entries: name -> format code
    pub colors: BTreeMap<String, String>,
    /// Constant text placeholders: identifier -> value
    pub placeholders: BTreeMap<String, String>,
    /// Player used when no live context is available (previews, CLI)
    pub player: Option<StaticPlayer>,
    /// Server state used when no live server is available
    pub server: Option<StaticServer>,
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check color codes and placeholder identifiers
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, code) in &self.colors {
            if !is_identifier(name) {
                return Err(ConfigError::InvalidIdentifier {
                    identifier: name.clone(),
                });
            }
            let mut chars = code.chars();
            let valid = matches!(
                (chars.next(), chars.next(), chars.next()),
                (Some(ESCAPE), Some(c), None) if is_format_code(c)
            );
            if !valid {
                return Err(ConfigError::InvalidColor {
                    name: name.clone(),
                    code: code.clone(),
                });
            }
        }

        for identifier in self.placeholders.keys() {
            if !is_identifier(identifier) {
                return Err(ConfigError::InvalidIdentifier {
                    identifier: identifier.clone(),
                });
            }
        }

        Ok(())
    }

    /// The default palette with this configuration's colors applied
    pub fn palette(&self) -> Palette {
        self.colors
            .iter()
            .fold(Palette::default(), |palette, (name, code)| palette.with(name, code.as_str()))
    }

    /// Set the recursion bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.resolver.max_depth = max_depth;
        self
    }

    /// Add or replace a palette color
    pub fn with_color(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.colors.insert(name.into(), code.into());
        self
    }

    /// Add a constant text placeholder
    pub fn with_placeholder(
        mut self,
        identifier: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.placeholders.insert(identifier.into(), value.into());
        self
    }

    /// Set the preview player
    pub fn with_player(mut self, player: StaticPlayer) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the preview server state
    pub fn with_server(mut self, server: StaticServer) -> Self {
        self.server = Some(server);
        self
    }
}

/// Whether `name` can appear as a token identifier
fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
