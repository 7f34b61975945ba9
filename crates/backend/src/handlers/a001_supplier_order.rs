use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_supplier_order::dto::{DataResponse, OrderListResponse};
use contracts::domain::a001_supplier_order::export::CSV_FILE_NAME;
use contracts::domain::a001_supplier_order::{OrderId, OrderListQuery, OrderSort, SupplierOrder};
use contracts::domain::common::AggregateId;
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;

/// Верхняя граница размера страницы API
pub const MAX_PAGE_SIZE: usize = 100;

/// Query параметры списка. Числа принимаются строками: мусор не приводит к 400,
/// а заменяется значением по умолчанию.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub supplier: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl ListOrdersQuery {
    fn into_list_query(self, default_page_size: usize) -> OrderListQuery {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let page_size = self
            .page_size
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(default_page_size)
            .clamp(1, MAX_PAGE_SIZE);

        OrderListQuery {
            supplier: self.supplier,
            status: self.status,
            query: self.q,
            sort: self.sort.as_deref().and_then(OrderSort::parse),
            page,
            page_size,
        }
    }
}

/// GET /api/suppliers
pub async fn list_suppliers(State(state): State<Arc<AppState>>) -> Json<DataResponse<Vec<String>>> {
    Json(DataResponse {
        data: state.store.suppliers(),
    })
}

/// GET /api/supplier-orders
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Json<OrderListResponse> {
    let list_query = query.into_list_query(state.default_page_size);
    let result = state.store.list(&list_query);

    tracing::debug!(
        "Listed {} of {} orders (page {} of {})",
        result.visible_orders.len(),
        result.total,
        result.current_page,
        result.total_pages
    );

    Json(result.into())
}

/// GET /api/supplier-orders/:id
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SupplierOrder>, Response> {
    let order_id = OrderId::from_string(&id).map_err(|e| {
        tracing::debug!("Bad order id {}: {}", id, e);
        StatusCode::BAD_REQUEST.into_response()
    })?;

    match state.store.get_by_id(order_id) {
        Some(order) => Ok(Json(order.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Order not found"})),
        )
            .into_response()),
    }
}

/// GET /api/supplier-orders/export.csv
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Response, StatusCode> {
    let list_query = query.into_list_query(state.default_page_size);

    let csv = state.store.export_csv(&list_query).map_err(|e| {
        tracing::error!("Failed to export supplier orders: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}
