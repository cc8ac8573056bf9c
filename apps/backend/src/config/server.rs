//! Server and session settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HEARTBEAT_SECS: u64 = 20;
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 60;

/// Per-connection behaviour shared by every websocket session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub heartbeat_interval: Duration,
    /// Silence after which a connection is treated as dead.
    pub client_timeout: Duration,
    /// Send `{"type":"error",..}` frames back to a sender whose move was refused.
    pub report_invalid_moves: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            report_invalid_moves: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session: SessionSettings,
    /// Fixed seed for every room's dice (reproducible games).
    pub dice_seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&get, "BACKEND_PORT", DEFAULT_PORT)?;
        let heartbeat = parse_or(&get, "YACHT_WS_HEARTBEAT_SECS", DEFAULT_HEARTBEAT_SECS)?;
        let timeout = parse_or(
            &get,
            "YACHT_WS_CLIENT_TIMEOUT_SECS",
            DEFAULT_CLIENT_TIMEOUT_SECS,
        )?;
        let report = match get("YACHT_REPORT_INVALID_MOVES") {
            Some(raw) => parse_flag("YACHT_REPORT_INVALID_MOVES", &raw)?,
            None => false,
        };
        let dice_seed = get("YACHT_DICE_SEED")
            .map(|raw| parse_value::<u64>("YACHT_DICE_SEED", &raw))
            .transpose()?;

        if heartbeat == 0 {
            return Err(AppError::config("YACHT_WS_HEARTBEAT_SECS must be at least 1"));
        }
        if timeout <= heartbeat {
            return Err(AppError::config(format!(
                "YACHT_WS_CLIENT_TIMEOUT_SECS ({timeout}) must exceed YACHT_WS_HEARTBEAT_SECS ({heartbeat})"
            )));
        }

        Ok(Self {
            host,
            port,
            session: SessionSettings {
                heartbeat_interval: Duration::from_secs(heartbeat),
                client_timeout: Duration::from_secs(timeout),
                report_invalid_moves: report,
            },
            dice_seed,
        })
    }
}

fn parse_or<T, G>(get: &G, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::config(format!("{name} has invalid value '{raw}': {e}")))
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{name} must be a boolean (true/false), got '{raw}'"
        ))),
    }
}
