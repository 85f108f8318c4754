//! Process configuration loaded from the environment.
//!
//! Everything is read once at startup into a [`Config`] which is then handed
//! to the components that need it. Values are looked up through a closure so
//! tests can supply them without touching the process environment.
//!
//! | variable         | default          |
//! |------------------|------------------|
//! | `SMTP_SERVER`    | `smtp.gmail.com` |
//! | `SMTP_PORT`      | `587`            |
//! | `EMAIL_ADDRESS`  | required         |
//! | `EMAIL_PASSWORD` | required         |
//! | `KINDLE_EMAIL`   | required         |
//! | `SENDER_NAME`    | `Kindler`        |
//! | `SENDS_FOLDER`   | `sends`          |
//! | `PANDOC`         | `pandoc`         |
//! | `FETCH_TIMEOUT`  | `30`             |
//! | `BIND_ADDR`      | `127.0.0.1:8000` |

use std::path::PathBuf;
use std::str::FromStr;

use crate::fetch::FetchConfig;
use crate::{KindlerError, Result};

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SENDER_NAME: &str = "Kindler";
pub const DEFAULT_SENDS_FOLDER: &str = "sends";
pub const DEFAULT_PANDOC: &str = "pandoc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// SMTP submission settings and the fixed delivery address.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Sender address, also used as the SMTP login.
    pub sender: String,
    pub password: String,
    /// Display name on the `From` header.
    pub sender_name: String,
    /// The reading device's inbox.
    pub recipient: String,
}

/// Full configuration of a Kindler process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding downloaded pages and converted books.
    pub workdir: PathBuf,
    /// Converter executable.
    pub pandoc: String,
    pub fetch: FetchConfig,
    pub smtp: SmtpConfig,
    /// Listen address of the HTTP service.
    pub bind_addr: String,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to resolve variable names.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| KindlerError::ConfigError(format!("{key} must be set")));

        let smtp = SmtpConfig {
            host: get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            port: parse_var("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            sender: required("EMAIL_ADDRESS")?,
            password: required("EMAIL_PASSWORD")?,
            sender_name: get("SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            recipient: required("KINDLE_EMAIL")?,
        };

        let defaults = FetchConfig::default();
        let fetch = FetchConfig {
            timeout: parse_var("FETCH_TIMEOUT", get("FETCH_TIMEOUT"), defaults.timeout)?,
            ..defaults
        };

        Ok(Self {
            workdir: get("SENDS_FOLDER").unwrap_or_else(|| DEFAULT_SENDS_FOLDER.to_string()).into(),
            pandoc: get("PANDOC").unwrap_or_else(|| DEFAULT_PANDOC.to_string()),
            fetch,
            smtp,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| KindlerError::ConfigError(format!("{key} has invalid value `{raw}`"))),
    }
}
