//! Configuration loader
//!
//! The environment wins when it names all three provider settings. A
//! partial environment falls back to a config file; an environment that is
//! complete but malformed is an error, never silently replaced by a file.
//!
//! ## Environment Variables
//! Required:
//! - `GOOGLE_CLIENT_ID`: OAuth client id
//! - `GOOGLE_CLIENT_SECRET`: OAuth client secret
//! - `GOOGLE_CALENDAR_API_URL`: calendar events listing endpoint
//!
//! Optional:
//! - `DUEDASH_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `DUEDASH_BASE_URL`: public origin for the OAuth redirect
//! - `DUEDASH_UPSTREAM_TIMEOUT_SECS`: upstream request timeout
//! - `DUEDASH_LOGIN_TIMEOUT_SECS`: how long a started login stays valid
//! - `DUEDASH_SESSION_TTL_SECS`: upper bound on a signed-in session
//! - `GOOGLE_AUTH_URL` / `GOOGLE_TOKEN_URL`: provider endpoint overrides
//!
//! ## Config Files
//! `config.{json,toml}` or `duedash.{json,toml}`, searched for in the
//! working directory, then its parent, then next to the executable. The
//! format follows the extension.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use duedash_domain::{Config, DueDashError, Result};
use tracing::{debug, info};

pub const ENV_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_CLIENT_SECRET";
pub const ENV_CALENDAR_API_URL: &str = "GOOGLE_CALENDAR_API_URL";
pub const ENV_BIND_ADDR: &str = "DUEDASH_BIND_ADDR";
pub const ENV_BASE_URL: &str = "DUEDASH_BASE_URL";
pub const ENV_UPSTREAM_TIMEOUT: &str = "DUEDASH_UPSTREAM_TIMEOUT_SECS";
pub const ENV_LOGIN_TIMEOUT: &str = "DUEDASH_LOGIN_TIMEOUT_SECS";
pub const ENV_SESSION_TTL: &str = "DUEDASH_SESSION_TTL_SECS";
pub const ENV_AUTH_URL: &str = "GOOGLE_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "GOOGLE_TOKEN_URL";

const REQUIRED_VARS: [&str; 3] = [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_CALENDAR_API_URL];

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "duedash.json", "duedash.toml"];

/// Load configuration from the process environment, else from a file.
///
/// # Errors
/// Returns `DueDashError::Config` if the environment is complete but
/// invalid, or if it is incomplete and no usable config file exists.
pub fn load() -> Result<Config> {
    load_with(|key| std::env::var(key).ok(), || load_from_file(None))
}

/// [`load`] with the environment lookup and the file fallback supplied by
/// the caller.
///
/// # Errors
/// See [`load`].
pub fn load_with<F, G>(lookup: F, file_fallback: G) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
    G: FnOnce() -> Result<Config>,
{
    let missing = missing_required(&lookup);
    if missing.is_empty() {
        let config = load_from_lookup(lookup)?;
        info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    debug!(missing = ?missing, "environment incomplete, trying config file");
    file_fallback().map_err(|err| {
        DueDashError::Config(format!(
            "missing environment variables {} and no usable config file: {err}",
            missing.join(", ")
        ))
    })
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `DueDashError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from any key lookup; `load_from_env` passes the process
/// environment.
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        non_blank(&lookup, key).ok_or_else(|| {
            DueDashError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let mut config = Config::new(
        required(ENV_CLIENT_ID)?,
        required(ENV_CLIENT_SECRET)?,
        required(ENV_CALENDAR_API_URL)?,
    );

    if let Some(bind) = lookup(ENV_BIND_ADDR) {
        config.server.bind_address = bind;
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.server.base_url = base_url;
    }
    if let Some(raw) = lookup(ENV_UPSTREAM_TIMEOUT) {
        config.upstream.timeout_seconds = parse_value(ENV_UPSTREAM_TIMEOUT, &raw)?;
    }
    if let Some(raw) = lookup(ENV_LOGIN_TIMEOUT) {
        config.auth.login_timeout_seconds = parse_value(ENV_LOGIN_TIMEOUT, &raw)?;
    }
    if let Some(raw) = lookup(ENV_SESSION_TTL) {
        config.auth.session_ttl_seconds = parse_value(ENV_SESSION_TTL, &raw)?;
    }
    if let Some(url) = lookup(ENV_AUTH_URL) {
        config.auth.authorization_endpoint = url;
    }
    if let Some(url) = lookup(ENV_TOKEN_URL) {
        config.auth.token_endpoint = url;
    }

    Ok(config)
}

/// Load configuration from a JSON or TOML file.
///
/// With `None`, the first file found by [`find_config_file`] is used.
///
/// # Errors
/// Returns `DueDashError::Config` if no file is found, it cannot be read,
/// or its contents do not parse into a [`Config`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => find_config_file().ok_or_else(|| {
            DueDashError::Config("No config file found in any of the standard locations".into())
        })?,
    };
    let format = ConfigFormat::from_path(&path)?;

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        DueDashError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    info!(path = %path.display(), "Loading configuration from file");
    format.parse(&contents)
}

/// First existing config file in the search directories.
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));

    let parent = cwd.as_deref().and_then(Path::parent).map(Path::to_path_buf);
    let dirs = [cwd, parent, exe_dir];

    dirs.iter().flatten().find_map(|dir| config_file_in(dir))
}

fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(DueDashError::Config(format!(
                "Unsupported config format for {}: {}",
                path.display(),
                other.unwrap_or("no extension")
            ))),
        }
    }

    fn parse(self, contents: &str) -> Result<Config> {
        match self {
            Self::Json => serde_json::from_str(contents)
                .map_err(|e| DueDashError::Config(format!("Invalid JSON format: {e}"))),
            Self::Toml => toml::from_str(contents)
                .map_err(|e| DueDashError::Config(format!("Invalid TOML format: {e}"))),
        }
    }
}

fn missing_required<F>(lookup: &F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS.into_iter().filter(|key| non_blank(lookup, key).is_none()).collect()
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| DueDashError::Config(format!("Invalid value for {key}: {e}")))
}
