//! Typed configuration from environment variables.
//!
//! Loaded once at startup; required values that are missing fail fast.
//! The database URL is held as a [`SecretString`] so it never reaches logs.

use camino::Utf8PathBuf;
use secrecy::SecretString;
use thiserror::Error;

use crate::task::ports::{AlwaysConfirm, Confirmation, ConfirmationRequest};

/// Selects the durable store backend.
pub const STORE_VAR: &str = "TASQ_STORE";
/// Directory holding the JSON store.
pub const STORE_PATH_VAR: &str = "TASQ_STORE_PATH";
/// `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "TASQ_DATABASE_URL";
/// Whether destructive operations ask before running.
pub const REQUIRE_CONFIRMATION_VAR: &str = "TASQ_REQUIRE_CONFIRMATION";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable required by the chosen backend is not set.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// A variable holds a value outside its accepted set.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Where the board is persisted.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Nothing survives the process.
    Memory,
    /// A JSON file inside `path`.
    Json {
        /// Store directory; created when absent.
        path: Utf8PathBuf,
    },
    /// A `PostgreSQL` database.
    Postgres {
        /// Connection string.
        database_url: SecretString,
    },
}

impl StoreConfig {
    /// Returns the backend name as accepted by `TASQ_STORE`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json { .. } => "json",
            Self::Postgres { .. } => "postgres",
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct TasqConfig {
    /// Durable store selection.
    pub store: StoreConfig,
    /// When `false`, destructive operations are approved without asking.
    pub require_confirmation: bool,
}

impl Default for TasqConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::Memory,
            require_confirmation: true,
        }
    }
}

impl TasqConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// variable holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// variable holds an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = lookup(STORE_VAR).unwrap_or_else(|| "memory".to_owned());
        let store = match kind.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreConfig::Memory,
            "json" => StoreConfig::Json {
                path: Utf8PathBuf::from(required_var(&lookup, STORE_PATH_VAR)?),
            },
            "postgres" => StoreConfig::Postgres {
                database_url: SecretString::from(required_var(&lookup, DATABASE_URL_VAR)?),
            },
            _ => {
                return Err(ConfigError::InvalidValue {
                    name: STORE_VAR,
                    value: kind,
                });
            }
        };
        let require_confirmation = match lookup(REQUIRE_CONFIRMATION_VAR) {
            None => true,
            Some(value) => parse_flag(REQUIRE_CONFIRMATION_VAR, value)?,
        };
        Ok(Self {
            store,
            require_confirmation,
        })
    }

    /// Wraps the caller's confirmation prompt according to
    /// [`Self::require_confirmation`].
    #[must_use]
    pub fn confirmation<P>(&self, prompt: P) -> ConfirmationPolicy<P> {
        if self.require_confirmation {
            ConfirmationPolicy::Ask(prompt)
        } else {
            ConfirmationPolicy::Skip(AlwaysConfirm)
        }
    }
}

/// Confirmation capability chosen by configuration.
#[derive(Debug, Clone)]
pub enum ConfirmationPolicy<P> {
    /// Ask through the wrapped prompt.
    Ask(P),
    /// Approve without asking.
    Skip(AlwaysConfirm),
}

impl<P> Confirmation for ConfirmationPolicy<P>
where
    P: Confirmation,
{
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        match self {
            Self::Ask(prompt) => prompt.confirm(request),
            Self::Skip(always) => always.confirm(request),
        }
    }
}

fn required_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}
