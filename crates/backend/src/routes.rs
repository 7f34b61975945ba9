use axum::{http::Method, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, system, AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: Arc<AppState>) -> Router {
    // Внешние UI ходят к API с других origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Supplier orders handlers
        .route(
            "/api/suppliers",
            get(handlers::a001_supplier_order::list_suppliers),
        )
        .route(
            "/api/supplier-orders",
            get(handlers::a001_supplier_order::list_orders),
        )
        .route(
            "/api/supplier-orders/export.csv",
            get(handlers::a001_supplier_order::export_csv),
        )
        .route(
            "/api/supplier-orders/:id",
            get(handlers::a001_supplier_order::get_order),
        )
        .with_state(state)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
}
