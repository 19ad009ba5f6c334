use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use engine_logging::LogSettings;
use log::LevelFilter;
use streamcheck_engine::EngineSettings;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Defaults and ceilings for the `conc` and `timeout` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub default_concurrency: usize,
    pub max_concurrency: usize,
    pub default_timeout_secs: u64,
    pub max_timeout_secs: u64,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            default_concurrency: 20,
            max_concurrency: 200,
            default_timeout_secs: 10,
            max_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub limits: RequestLimits,
    pub engine: EngineSettings,
    pub log: LogSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            limits: RequestLimits::default(),
            engine: EngineSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Unset or blank keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get("HOST") {
            config.host = parse("HOST", &raw)?;
        }
        if let Some(raw) = get("PORT") {
            config.port = parse("PORT", &raw)?;
        }

        let limits = &mut config.limits;
        if let Some(raw) = get("STREAMCHECK_MAX_CONC") {
            limits.max_concurrency = parse_positive("STREAMCHECK_MAX_CONC", &raw)?;
        }
        if let Some(raw) = get("STREAMCHECK_DEFAULT_CONC") {
            limits.default_concurrency = parse_positive("STREAMCHECK_DEFAULT_CONC", &raw)?;
        }
        if let Some(raw) = get("STREAMCHECK_MAX_TIMEOUT") {
            limits.max_timeout_secs = parse_positive("STREAMCHECK_MAX_TIMEOUT", &raw)?;
        }
        if let Some(raw) = get("STREAMCHECK_DEFAULT_TIMEOUT") {
            limits.default_timeout_secs = parse_positive("STREAMCHECK_DEFAULT_TIMEOUT", &raw)?;
        }
        limits.default_concurrency = limits.default_concurrency.min(limits.max_concurrency);
        limits.default_timeout_secs = limits.default_timeout_secs.min(limits.max_timeout_secs);

        if let Some(raw) = get("STREAMCHECK_USER_AGENT") {
            config.engine.headers.user_agent = raw;
        }

        if let Some(raw) = get("STREAMCHECK_LOG") {
            config.log.level = parse::<LevelFilter>("STREAMCHECK_LOG", &raw)?;
        }
        config.log.file = get("STREAMCHECK_LOG_FILE").map(PathBuf::from);

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

fn parse_positive<T: FromStr + Default + PartialEq>(
    key: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    let value: T = parse(key, raw)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        });
    }
    Ok(value)
}
