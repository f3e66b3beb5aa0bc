/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, group access 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - filter 設定 (GroupAccessConfig) はホスト側の JSON 形式 (camelCase) も受け付ける
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_COOKIE_NAME: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Filter configuration, as a host proxy hands it over.
///
/// Unset fields fall back to [`Default`], which allows no group at all.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupAccessConfig {
    pub allow_groups: Vec<String>,
    // Empty means "read the group property from the top level".
    pub claims_prefix: String,
    pub group_property: String,
    pub cookie_name: String,
}

impl Default for GroupAccessConfig {
    fn default() -> Self {
        Self {
            allow_groups: Vec::new(),
            claims_prefix: String::new(),
            group_property: String::new(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}

impl GroupAccessConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|_| ConfigError::Invalid("GROUP_ACCESS_CONFIG"))
    }
}

/// Transport limits for the forward-auth server.
#[derive(Debug, Clone, Copy)]
pub struct HttpPolicy {
    pub timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            body_limit_bytes: 64 * 1024,
        }
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub http: HttpPolicy,

    pub group_access_name: String,
    pub group_access: GroupAccessConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = var("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = var("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let defaults = HttpPolicy::default();
        let http = HttpPolicy {
            timeout: var("HTTP_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            body_limit_bytes: var("HTTP_BODY_LIMIT_BYTES")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.body_limit_bytes),
        };

        let group_access_name =
            var("GROUP_ACCESS_NAME").unwrap_or_else(|| "group-access".to_string());

        let group_access = match var("GROUP_ACCESS_CONFIG") {
            Some(raw) => GroupAccessConfig::from_json(&raw)?,
            None => group_access_from_vars(&var)?,
        };

        if group_access.group_property.is_empty() {
            return Err(ConfigError::Missing("GROUP_PROPERTY"));
        }

        Ok(Self {
            addr,
            app_env,
            http,
            group_access_name,
            group_access,
        })
    }
}

fn group_access_from_vars(
    var: &impl Fn(&str) -> Option<String>,
) -> Result<GroupAccessConfig, ConfigError> {
    let allow_groups = var("ALLOW_GROUPS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    let group_property = var("GROUP_PROPERTY").ok_or(ConfigError::Missing("GROUP_PROPERTY"))?;

    Ok(GroupAccessConfig {
        allow_groups,
        claims_prefix: var("CLAIMS_PREFIX").unwrap_or_default(),
        group_property,
        cookie_name: var("TOKEN_COOKIE").unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
    })
}
