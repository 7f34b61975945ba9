pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use contracts::domain::common::Origin;
use domain::a001_supplier_order::service::OrderStore;
use domain::a001_supplier_order::source::build_order_source;

/// Состояние приложения, общее для всех обработчиков.
/// Заполняется один раз при старте и дальше только читается.
#[derive(Debug)]
pub struct AppState {
    pub store: OrderStore,
    /// Размер страницы, если клиент не передал pageSize
    pub default_page_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    // Единственная точка ожидания до старта сервера: загрузка заказов
    let source = build_order_source(&config.source);
    let store = OrderStore::load(source.as_ref()).await?;
    if store.origin() == Origin::Sample {
        tracing::warn!("Serving built-in sample orders, remote data is not available");
    }

    let state = std::sync::Arc::new(AppState {
        store,
        default_page_size: config.list.page_size,
    });

    let app = routes::configure_routes(state);

    let addr = config.server.socket_addr()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
