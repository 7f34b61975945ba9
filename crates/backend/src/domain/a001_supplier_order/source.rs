//! Источники коллекции заказов.
//!
//! Источник выбирается при старте: внешний API с подстраховкой встроенным
//! набором образцов, либо только образцы. Остальной код получает готовый
//! `Vec<SupplierOrder>` и об ошибках загрузки не знает.

use async_trait::async_trait;
use contracts::domain::a001_supplier_order::dto::RemoteOrderListResponse;
use contracts::domain::a001_supplier_order::sample::sample_orders;
use contracts::domain::a001_supplier_order::SupplierOrder;
use contracts::domain::common::Origin;
use serde::Serialize;
use thiserror::Error;

use crate::shared::config::SourceConfig;

/// Ошибки загрузки заказов
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid order record: {0}")]
    InvalidRecord(String),
}

/// Загруженная коллекция и её происхождение
#[derive(Debug, Clone)]
pub struct LoadedOrders {
    pub origin: Origin,
    pub orders: Vec<SupplierOrder>,
}

/// Трейт для источников заказов
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Загрузить всю коллекцию заказов
    async fn fetch_orders(&self) -> Result<LoadedOrders, SourceError>;

    /// Название источника для логов
    fn name(&self) -> &str;
}

/// Встроенный набор образцов. Никогда не возвращает ошибку.
#[derive(Debug, Default, Clone)]
pub struct SampleOrderSource;

#[async_trait]
impl OrderSource for SampleOrderSource {
    async fn fetch_orders(&self) -> Result<LoadedOrders, SourceError> {
        Ok(LoadedOrders {
            origin: Origin::Sample,
            orders: sample_orders(),
        })
    }

    fn name(&self) -> &str {
        "sample"
    }
}

/// HTTP-клиент внешнего API заказов: `GET <endpoint>?page=1&pageSize=N`
pub struct RemoteOrderSource {
    client: reqwest::Client,
    endpoint: String,
    page_size: usize,
}

#[derive(Serialize)]
struct RemoteListParams {
    page: usize,
    #[serde(rename = "pageSize")]
    page_size: usize,
}

impl RemoteOrderSource {
    pub fn new(
        endpoint: impl Into<String>,
        page_size: usize,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            page_size,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderSource for RemoteOrderSource {
    async fn fetch_orders(&self) -> Result<LoadedOrders, SourceError> {
        let params = RemoteListParams {
            page: 1,
            page_size: self.page_size,
        };

        tracing::debug!("GET {} page=1 pageSize={}", self.endpoint, self.page_size);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: RemoteOrderListResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))?;

        let orders = parsed
            .data
            .into_iter()
            .map(SupplierOrder::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(SourceError::InvalidRecord)?;

        tracing::info!(
            "Fetched {} orders from {} (remote total: {:?})",
            orders.len(),
            self.endpoint,
            parsed.total
        );

        Ok(LoadedOrders {
            origin: Origin::Remote,
            orders,
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Основной источник с подстраховкой: при любой ошибке основного
/// возвращается коллекция запасного.
pub struct FallbackOrderSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackOrderSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> OrderSource for FallbackOrderSource<P, F>
where
    P: OrderSource,
    F: OrderSource,
{
    async fn fetch_orders(&self) -> Result<LoadedOrders, SourceError> {
        match self.primary.fetch_orders().await {
            Ok(loaded) => Ok(loaded),
            Err(e) => {
                tracing::warn!(
                    "Source '{}' unavailable ({}), using fallback '{}' data",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                self.fallback.fetch_orders().await
            }
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

/// Собрать источник по конфигурации
pub fn build_order_source(config: &SourceConfig) -> Box<dyn OrderSource> {
    let Some(endpoint) = config.endpoint.as_deref() else {
        tracing::info!("No orders endpoint configured, serving sample data");
        return Box::new(SampleOrderSource);
    };

    match RemoteOrderSource::new(endpoint, config.page_size, config.timeout()) {
        Ok(remote) => {
            tracing::info!("Orders will be loaded from {}", remote.endpoint());
            Box::new(FallbackOrderSource::new(remote, SampleOrderSource))
        }
        Err(e) => {
            tracing::warn!("Cannot create HTTP client ({}), serving sample data", e);
            Box::new(SampleOrderSource)
        }
    }
}
