use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("unknown log format {0:?}, expected \"pretty\" or \"json\"")]
    UnknownLogFormat(String),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownLogFormat(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn new(
        host: &str,
        port: u16,
        log_level: &str,
        log_format: &str,
    ) -> Result<Self, ConfigError> {
        let ip = host
            .parse::<IpAddr>()
            .map_err(|source| ConfigError::InvalidHost {
                host: host.to_string(),
                source,
            })?;

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            log_level: log_level.to_string(),
            log_format: log_format.parse()?,
        })
    }
}
