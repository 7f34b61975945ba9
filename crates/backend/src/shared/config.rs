use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Переменная окружения, переопределяющая `source.endpoint`
pub const ENDPOINT_ENV: &str = "SUPPLIER_ORDERS_ENDPOINT";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {}:{}: {}", self.host, self.port, e))
    }
}

/// Внешний источник заказов
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceConfig {
    /// Без endpoint используется только встроенный набор образцов
    pub endpoint: Option<String>,
    #[serde(default = "default_fetch_page_size")]
    pub page_size: usize,
    /// По умолчанию таймаут не задан
    pub timeout_secs: Option<u64>,
}

fn default_fetch_page_size() -> usize {
    100
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            page_size: default_fetch_page_size(),
            timeout_secs: None,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: contracts::domain::a001_supplier_order::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000

[source]
page_size = 100

[list]
page_size = 6
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `SUPPLIER_ORDERS_ENDPOINT` overrides `source.endpoint` in both cases.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match config_next_to_exe() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            parse_config(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)?
        }
    };

    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        apply_endpoint_override(&mut config, &endpoint);
    }

    Ok(config)
}

fn config_next_to_exe() -> Option<std::path::PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    if Path::new(&config_path).exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.list.page_size == 0 || config.source.page_size == 0 {
        anyhow::bail!("page_size must be positive");
    }
    Ok(config)
}

/// Пустое значение отключает внешний источник
fn apply_endpoint_override(config: &mut Config, endpoint: &str) {
    let endpoint = endpoint.trim();
    config.source.endpoint = if endpoint.is_empty() {
        None
    } else {
        Some(endpoint.to_string())
    };
}
