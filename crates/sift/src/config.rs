//! Module: config
//! Responsibility: TOML-backed settings for reserved keys, pagination
//! defaults and disabled directives.

use serde::{Deserialize, Serialize};
use sift_core::{decode::ReservedKeys, registry::DirectiveRegistry};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("reserved key name for '{0}' is empty")]
    EmptyReservedKey(&'static str),

    #[error("reserved key '{0}' is used more than once")]
    DuplicateReservedKey(String),

    #[error("default_per_page must be greater than zero")]
    ZeroPageSize,

    #[error("cannot disable unknown directive '{0}'")]
    UnknownDirective(String),
}

///
/// SiftConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiftConfig {
    pub reserved: ReservedConfig,
    pub pagination: PaginationConfig,
    pub directives: DirectivesConfig,
}

impl SiftConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loading sift config");

        Self::from_toml_str(&text)
    }

    /// Structural checks that need no registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reserved.validate()?;

        if self.pagination.default_per_page == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(())
    }

    /// Remove every disabled directive from `registry`.
    pub fn restrict(&self, registry: &mut DirectiveRegistry) -> Result<(), ConfigError> {
        for name in &self.directives.disabled {
            registry
                .unregister(name)
                .map_err(|_| ConfigError::UnknownDirective(name.clone()))?;
        }

        Ok(())
    }
}

///
/// ReservedConfig
///
/// Transport parameter names that never reach directive resolution.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReservedConfig {
    pub page: String,
    pub per_page: String,
    pub paginate: String,
}

impl ReservedConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("page", &self.page),
            ("per_page", &self.per_page),
            ("paginate", &self.paginate),
        ];

        for (slot, name) in named {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyReservedKey(slot));
            }
        }

        for (i, (_, name)) in named.iter().enumerate() {
            if named[i + 1..].iter().any(|(_, other)| other == name) {
                return Err(ConfigError::DuplicateReservedKey(name.to_string()));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn keys(&self) -> ReservedKeys {
        ReservedKeys::new(&self.page, &self.per_page, &self.paginate)
    }
}

impl Default for ReservedConfig {
    fn default() -> Self {
        Self {
            page: ReservedKeys::DEFAULT_PAGE.to_string(),
            per_page: ReservedKeys::DEFAULT_PER_PAGE.to_string(),
            paginate: ReservedKeys::DEFAULT_PAGINATE.to_string(),
        }
    }
}

///
/// PaginationConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub default_per_page: u64,
}

impl PaginationConfig {
    pub const DEFAULT_PER_PAGE: u64 = 15;
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

///
/// DirectivesConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectivesConfig {
    /// Built-in names to leave unregistered.
    pub disabled: Vec<String>,
}

///
/// TESTS
///
