//! Connection configuration
//!
//! Values are layered, lowest precedence first:
//! 1. `config.yaml` (explicit `--config` path, or the user config directory)
//! 2. Environment variables (`JIRA_URL`, `JIRA_USERNAME`, `JIRA_API_TOKEN`, ...)
//! 3. Command-line flags
//!
//! Each layer is a [`PartialConfig`]; merging them and calling
//! [`PartialConfig::build`] yields a validated [`Config`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use directories::ProjectDirs;
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE: &str = "config.yaml";

const URL_VARS: &[&str] = &["JIRA_URL"];
const USERNAME_VARS: &[&str] = &["JIRA_USERNAME", "JIRA_EMAIL", "JIRA_USER"];
const TOKEN_VARS: &[&str] = &["JIRA_API_TOKEN", "JIRA_TOKEN"];
const AUTH_VARS: &[&str] = &["JIRA_AUTH"];
const BOARD_FILTER_VARS: &[&str] = &["JIRA_BOARD_FILTER"];
const TIMEOUT_VARS: &[&str] = &["JIRA_TIMEOUT"];

/// Errors while loading or validating configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Missing configuration: {}", .missing.join(", "))]
    #[diagnostic(help(
        "Set them in the environment or a .env file, e.g.\n  \
         export JIRA_URL='https://company.atlassian.net'\n  \
         export JIRA_USERNAME='user@company.com'\n  \
         export JIRA_API_TOKEN='your-api-token'"
    ))]
    Missing { missing: Vec<&'static str> },

    #[error("Invalid JIRA URL '{url}': {reason}")]
    #[diagnostic(help("Use the base URL of your instance, e.g. https://company.atlassian.net"))]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// How requests authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Pick by server, falling back to the other scheme when rejected
    #[default]
    Auto,
    /// Username + API token (Atlassian Cloud, most servers)
    Basic,
    /// Personal Access Token as a bearer token (Red Hat JIRA, Data Center PATs)
    Bearer,
}

impl AuthMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(AuthMode::Auto),
            "basic" => Some(AuthMode::Basic),
            "bearer" | "pat" => Some(AuthMode::Bearer),
            _ => None,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Auto => write!(f, "auto"),
            AuthMode::Basic => write!(f, "basic"),
            AuthMode::Bearer => write!(f, "bearer"),
        }
    }
}

/// One configuration layer; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub auth: Option<AuthMode>,
    pub board_filter: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl PartialConfig {
    /// Default config file location (`~/.config/jira-cleanup/config.yaml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jira-cleanup").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Read a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read configuration from environment variables via `lookup`
    ///
    /// Empty values count as unset. Where several variables are accepted for
    /// one setting, the first one set wins.
    pub fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |vars: &[&str]| -> Option<(String, String)> {
            vars.iter().find_map(|&var| {
                lookup(var)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .map(|v| (var.to_string(), v))
            })
        };

        let auth = match get(AUTH_VARS) {
            Some((key, value)) => Some(
                AuthMode::parse(&value).ok_or(ConfigError::InvalidValue { key, value })?,
            ),
            None => None,
        };

        let timeout_secs = match get(TIMEOUT_VARS) {
            Some((key, value)) => Some(
                value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue { key, value })?,
            ),
            None => None,
        };

        Ok(Self {
            url: get(URL_VARS).map(|(_, v)| v),
            username: get(USERNAME_VARS).map(|(_, v)| v),
            token: get(TOKEN_VARS).map(|(_, v)| v),
            auth,
            board_filter: get(BOARD_FILTER_VARS).map(|(_, v)| v),
            timeout_secs,
        })
    }

    /// Read the config file (explicit path, or the default location if it exists)
    /// and the process environment, then apply `overrides` on top
    pub fn load(config_path: Option<&Path>, overrides: PartialConfig) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        let env = Self::from_env(|key| std::env::var(key).ok())?;
        Ok(file.merge(env).merge(overrides))
    }

    /// Overlay `higher` on top of `self`; set fields in `higher` win
    pub fn merge(self, higher: PartialConfig) -> PartialConfig {
        PartialConfig {
            url: higher.url.or(self.url),
            username: higher.username.or(self.username),
            token: higher.token.or(self.token),
            auth: higher.auth.or(self.auth),
            board_filter: higher.board_filter.or(self.board_filter),
            timeout_secs: higher.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Names of required settings that are still unset
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.url) {
            missing.push("JIRA_URL");
        }
        if self.auth == Some(AuthMode::Basic) && is_blank(&self.username) {
            missing.push("JIRA_USERNAME");
        }
        if is_blank(&self.token) {
            missing.push("JIRA_API_TOKEN");
        }
        missing
    }

    /// Validate and produce a complete [`Config`]
    pub fn build(self) -> Result<Config, ConfigError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { missing });
        }

        let raw_url = self.url.unwrap_or_default();
        let url = normalize_url(&raw_url)?;

        Ok(Config {
            url,
            username: self.username.filter(|u| !u.trim().is_empty()),
            token: self.token.unwrap_or_default(),
            auth: self.auth.unwrap_or_default(),
            board_filter: self.board_filter.filter(|f| !f.trim().is_empty()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Validated connection settings
#[derive(Clone)]
pub struct Config {
    /// Base URL without trailing slash
    pub url: String,
    pub username: Option<String>,
    pub token: String,
    pub auth: AuthMode,
    pub board_filter: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Host part of the URL, lower-cased
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("token", &mask_secret(&self.token))
            .field("auth", &self.auth)
            .field("board_filter", &self.board_filter)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Show only the first and last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

fn normalize_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
