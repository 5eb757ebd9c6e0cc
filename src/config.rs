//! Configuration management for the groupie tracker.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting has a default, so an empty
//! environment yields a working configuration that talks to the public
//! groupie tracker API.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

use crate::upstream::Endpoints;

const APP_DIR: &str = "groupie-tracker";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_ARTISTS_URL: &str = "https://groupietrackers.herokuapp.com/api/artists";
pub const DEFAULT_RELATIONS_URL: &str = "https://groupietrackers.herokuapp.com/api/relation";
pub const DEFAULT_LOCATIONS_URL: &str = "https://groupietrackers.herokuapp.com/api/locations";
pub const DEFAULT_PROBE_URL: &str = "http://clients3.google.com/generate_204";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot load environment file {}: {source}", .path.display())]
    Env {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },
}

/// Loads environment variables from the `.env` file in the local data
/// directory.
///
/// The file lives under `groupie-tracker/.env` in the platform data
/// directory:
/// - Linux: `~/.local/share/groupie-tracker/.env`
/// - macOS: `~/Library/Application Support/groupie-tracker/.env`
/// - Windows: `%LOCALAPPDATA%/groupie-tracker/.env`
///
/// A missing file is fine, every setting has a default. Variables already
/// present in the environment are not overridden.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use groupie_tracker::config;
///
/// if let Err(e) = config::load_env() {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub fn load_env() -> Result<(), ConfigError> {
    let path = app_data_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|source| ConfigError::Env { path, source })
}

/// Base directory for everything the application keeps on disk.
pub fn app_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

pub fn default_snapshot_dir() -> PathBuf {
    app_data_dir().join("snapshots")
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_address: String,
    pub endpoints: Endpoints,
    pub probe_url: String,
    pub probe_status: StatusCode,
    pub refresh_interval: Duration,
    pub probe_interval: Duration,
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    /// Offline probe cycles between two snapshot triggers.
    pub snapshot_every: u64,
    pub snapshot_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Upper bound for handling one HTTP request, answered with 408 past it.
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            endpoints: Endpoints {
                artists: DEFAULT_ARTISTS_URL.to_string(),
                relations: DEFAULT_RELATIONS_URL.to_string(),
                locations: DEFAULT_LOCATIONS_URL.to_string(),
            },
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_status: StatusCode::NO_CONTENT,
            refresh_interval: Duration::from_secs(60),
            probe_interval: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(30),
            snapshot_every: 180,
            snapshot_dir: default_snapshot_dir(),
            static_dir: PathBuf::from("web/static"),
            request_timeout: Duration::from_secs(30),
            shutdown_grace: Duration::from_secs(10),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for every
    /// key it returns `None` for.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);

        let probe_status = match lookup("GROUPIE_PROBE_STATUS") {
            Some(value) => parse_status(&value)?,
            None => defaults.probe_status,
        };

        Ok(Self {
            server_address: string("GROUPIE_SERVER_ADDRESS", defaults.server_address),
            endpoints: Endpoints {
                artists: string("GROUPIE_ARTISTS_URL", defaults.endpoints.artists),
                relations: string("GROUPIE_RELATIONS_URL", defaults.endpoints.relations),
                locations: string("GROUPIE_LOCATIONS_URL", defaults.endpoints.locations),
            },
            probe_url: string("GROUPIE_PROBE_URL", defaults.probe_url),
            probe_status,
            refresh_interval: seconds(
                &lookup,
                "GROUPIE_REFRESH_INTERVAL_SECS",
                defaults.refresh_interval,
            )?,
            probe_interval: seconds(
                &lookup,
                "GROUPIE_PROBE_INTERVAL_SECS",
                defaults.probe_interval,
            )?,
            probe_timeout: seconds(&lookup, "GROUPIE_PROBE_TIMEOUT_SECS", defaults.probe_timeout)?,
            fetch_timeout: seconds(&lookup, "GROUPIE_FETCH_TIMEOUT_SECS", defaults.fetch_timeout)?,
            snapshot_every: positive(&lookup, "GROUPIE_SNAPSHOT_EVERY", defaults.snapshot_every)?,
            snapshot_dir: lookup("GROUPIE_SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
            static_dir: lookup("GROUPIE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            request_timeout: seconds(
                &lookup,
                "GROUPIE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout,
            )?,
            shutdown_grace: seconds(
                &lookup,
                "GROUPIE_SHUTDOWN_GRACE_SECS",
                defaults.shutdown_grace,
            )?,
        })
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn positive<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    let parsed: u64 = parse(key, &value)?;
    if parsed == 0 {
        return Err(ConfigError::Invalid {
            key,
            value,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}

fn seconds<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    positive(lookup, key, default.as_secs()).map(Duration::from_secs)
}

fn parse_status(value: &str) -> Result<StatusCode, ConfigError> {
    let code: u16 = parse("GROUPIE_PROBE_STATUS", value)?;
    StatusCode::from_u16(code).map_err(|e| ConfigError::Invalid {
        key: "GROUPIE_PROBE_STATUS",
        value: value.to_string(),
        reason: e.to_string(),
    })
}
