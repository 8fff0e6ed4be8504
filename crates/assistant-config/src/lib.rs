//! Process settings loaded from the environment and an optional `.env` file.
//!
//! This crate owns the one piece of process-wide configuration:
//!
//! - [`Settings`] — API key, model, environment label, debug flag
//! - [`get_settings`] — Memoized accessor; builds [`Settings`] once per process
//! - [`ConfigError`] — Missing or malformed configuration
//!
//! Keys are matched case-insensitively. Process environment variables win over
//! values from the `.env` file, and a missing `.env` file is not an error.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use assistant_config::Settings;
//!
//! let values = HashMap::from([("openai_api_key".to_string(), "sk-test".to_string())]);
//! let settings = Settings::from_values(&values).unwrap();
//!
//! assert_eq!(settings.model, "gpt-4o-mini");
//! assert_eq!(settings.environment, "local");
//! assert!(settings.debug);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use assistant_core::{ModelConfig, REDACTED};

/// Default `.env` overlay file, resolved against the working directory.
pub const ENV_FILE: &str = ".env";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const KEY_API_KEY: &str = "openai_api_key";
const KEY_MODEL: &str = "openai_model";
const KEY_API_BASE: &str = "openai_base_url";
const KEY_ENVIRONMENT: &str = "environment";
const KEY_DEBUG: &str = "debug";
const KEY_BIND_ADDR: &str = "bind_addr";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Errors that can occur when resolving settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required key was not set (or set to an empty string).
    #[error("Missing required setting '{0}'")]
    MissingField(&'static str),

    /// A key was set to a value that cannot be parsed.
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },

    /// The `.env` file exists but could not be read or parsed.
    #[error("Failed to load env file '{path}': {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Process-wide configuration, immutable once built.
#[derive(Clone)]
pub struct Settings {
    /// Provider API key (`OPENAI_API_KEY`). Required, never printed.
    pub api_key: String,
    /// Model identifier (`OPENAI_MODEL`).
    pub model: String,
    /// OpenAI-compatible base URL (`OPENAI_BASE_URL`); provider default when unset.
    pub api_base: Option<String>,
    /// Deployment label reported by `/health` (`ENVIRONMENT`).
    pub environment: String,
    /// Verbose logging and error details (`DEBUG`).
    pub debug: bool,
    /// Address the HTTP server listens on (`BIND_ADDR`).
    pub bind_addr: String,
    /// Env file that was overlaid, if one existed.
    pub env_file: Option<PathBuf>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &REDACTED)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("environment", &self.environment)
            .field("debug", &self.debug)
            .field("bind_addr", &self.bind_addr)
            .field("env_file", &self.env_file)
            .finish()
    }
}

impl Settings {
    /// Loads settings from `.env` in the working directory and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(ENV_FILE), process_vars())
    }

    /// Loads settings from an explicit env file and variable set.
    ///
    /// Entries from `vars` override entries from `env_file`.
    pub fn load_from<I>(env_file: &Path, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let file_values = read_env_file(env_file)?;
        let found = file_values.is_some();

        let mut values = file_values.unwrap_or_default();
        values.extend(vars.into_iter().map(|(k, v)| (k.to_lowercase(), v)));

        let mut settings = Self::from_values(&values)?;
        settings.env_file = found.then(|| env_file.to_path_buf());
        Ok(settings)
    }

    /// Builds settings from a map whose keys are already lower-cased.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = values
            .get(KEY_API_KEY)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or(ConfigError::MissingField(KEY_API_KEY))?;

        let debug = match values.get(KEY_DEBUG) {
            Some(raw) => parse_bool(KEY_DEBUG, raw)?,
            None => true,
        };

        Ok(Self {
            api_key,
            model: string_or(values, KEY_MODEL, DEFAULT_MODEL),
            api_base: values.get(KEY_API_BASE).filter(|v| !v.is_empty()).cloned(),
            environment: string_or(values, KEY_ENVIRONMENT, DEFAULT_ENVIRONMENT),
            debug,
            bind_addr: string_or(values, KEY_BIND_ADDR, DEFAULT_BIND_ADDR),
            env_file: None,
        })
    }

    /// Returns the model configuration the LLM client is built from.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
        }
    }
}

/// Returns the process-wide settings, building them on first call.
///
/// Later calls return the same instance; the environment is not re-read.
pub fn get_settings() -> Result<&'static Settings, ConfigError> {
    get_or_load(&SETTINGS, Settings::load)
}

/// Fills `cell` from `load` on first success; failures are returned and not cached.
fn get_or_load<F>(cell: &'static OnceLock<Settings>, load: F) -> Result<&'static Settings, ConfigError>
where
    F: FnOnce() -> Result<Settings, ConfigError>,
{
    if let Some(settings) = cell.get() {
        return Ok(settings);
    }
    let settings = load()?;
    Ok(cell.get_or_init(|| settings))
}

/// Snapshot of the process environment, skipping non-UTF-8 entries.
fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

/// Reads `path` as a dotenv file into a lower-cased map. `None` when the file does not exist.
fn read_env_file(path: &Path) -> Result<Option<HashMap<String, String>>, ConfigError> {
    let env_err = |source: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(env_err(e)),
    };

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(env_err)?;
        values.insert(key.to_lowercase(), value);
    }
    Ok(Some(values))
}

fn string_or(values: &HashMap<String, String>, key: &str, default: &str) -> String {
    values.get(key).cloned().unwrap_or_else(|| default.to_string())
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: raw.to_string() }),
    }
}
