use clap::{Parser, ValueEnum};
use pasta_gateway::DEFAULT_IDENTITY_HEADER;
use pasta_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "PASTA_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "PASTA_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "PASTA_MYSQL_DSN";
pub const CACHE_BACKEND_ENV: &str = "PASTA_CACHE_BACKEND";
pub const REDIS_URL_ENV: &str = "PASTA_REDIS_URL";
pub const CACHE_TTL_SECS_ENV: &str = "PASTA_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_ENV: &str = "PASTA_CACHE_CAPACITY";
pub const ID_LENGTH_ENV: &str = "PASTA_ID_LENGTH";
pub const IDENTITY_HEADER_ENV: &str = "PASTA_IDENTITY_HEADER";
pub const STORE_TIMEOUT_MS_ENV: &str = "PASTA_STORE_TIMEOUT_MS";
pub const MAX_CONTENT_BYTES_ENV: &str = "PASTA_MAX_CONTENT_BYTES";
pub const LOG_FORMAT_ENV: &str = "PASTA_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "PASTA_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "none")]
    Disabled,
    #[value(name = "moka")]
    Moka,
    #[value(name = "redis")]
    Redis,
    /// Moka in front of Redis.
    #[value(name = "layered")]
    Layered,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::Disabled => write!(f, "none"),
            CacheBackendArg::Moka => write!(f, "moka"),
            CacheBackendArg::Redis => write!(f, "redis"),
            CacheBackendArg::Layered => write!(f, "layered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pasta", about = "A small pastebin server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::Moka
    )]
    pub cache: CacheBackendArg,

    #[arg(
        long,
        env = REDIS_URL_ENV,
        required_if_eq_any([("cache", "redis"), ("cache", "layered")])
    )]
    pub redis_url: Option<String>,

    #[arg(long, env = CACHE_TTL_SECS_ENV, default_value_t = 600)]
    pub cache_ttl_secs: u64,

    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = 10_000)]
    pub cache_capacity: u64,

    #[arg(long, env = ID_LENGTH_ENV, default_value_t = pasta_generator::DEFAULT_ID_LENGTH)]
    pub id_length: usize,

    #[arg(long, env = IDENTITY_HEADER_ENV, default_value = DEFAULT_IDENTITY_HEADER)]
    pub identity_header: String,

    #[arg(long, env = STORE_TIMEOUT_MS_ENV, default_value_t = 5_000)]
    pub store_timeout_ms: u64,

    #[arg(long, env = MAX_CONTENT_BYTES_ENV, default_value_t = 1024 * 1024)]
    pub max_content_bytes: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
