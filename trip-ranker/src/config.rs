//! Process configuration.
//!
//! Everything is read from environment variables. Unset variables fall back
//! to defaults; set but unparseable ones are errors.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheConfig, DEFAULT_MAX_ENTRIES, DEFAULT_TABLE_NAME, StoreBackend};
use crate::ns::{DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT, NsConfig};

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream API client settings.
    pub ns: NsConfig,

    /// Journey detail cache settings.
    pub cache: CacheConfig,

    /// Listen address of the HTTP server.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("NS_API_KEY").unwrap_or_else(|| {
            warn!("NS_API_KEY not set. API calls will fail.");
            String::new()
        });

        let ns = NsConfig {
            api_key,
            base_url: lookup("NS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_concurrent: parse(&lookup, "NS_API_MAX_CONCURRENT")?
                .unwrap_or(DEFAULT_MAX_CONCURRENT),
            timeout: parse(&lookup, "NS_API_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        };

        let backend = match lookup("PRODUCT_CACHE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("file") => StoreBackend::File {
                root: lookup("PRODUCT_CACHE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".")),
            },
            Some("dynamodb") => StoreBackend::DynamoDb,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "PRODUCT_CACHE_BACKEND",
                    value: other.to_string(),
                    reason: "expected \"memory\", \"file\" or \"dynamodb\"".to_string(),
                });
            }
        };

        let cache = CacheConfig {
            backend,
            table_name: lookup("NSPRODUCTCACHE_TABLE_NAME")
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            max_entries: parse(&lookup, "PRODUCT_CACHE_MAX_ENTRIES")?
                .unwrap_or(DEFAULT_MAX_ENTRIES),
        };

        let bind_addr: SocketAddr = match parse(&lookup, "BIND_ADDR")? {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                    reason: e.to_string(),
                })?,
        };

        Ok(Self {
            ns,
            cache,
            bind_addr,
        })
    }
}

/// Parse an optional variable.
fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
