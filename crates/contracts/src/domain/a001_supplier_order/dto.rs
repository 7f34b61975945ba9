//! Сетевые DTO списка заказов.
//!
//! Внешний API отдаёт `{ total, page, pageSize, data: [...] }`; идентификатор
//! заказа приходит как `order_id` или как `id`.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::aggregate::{LineItem, OrderId, OrderStatus, SupplierOrder};
use super::list::PageResult;

/// Заказ в том виде, в каком его присылает внешний API
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierOrderDto {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub supplier: String,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    pub total: f64,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub tracking: Option<String>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub received_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Статус принимается в любом регистре: "Received", "RECEIVED", "received"
fn deserialize_status<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    OrderStatus::from_code(&code)
        .ok_or_else(|| de::Error::custom(format!("unknown order status '{}'", code)))
}

impl TryFrom<SupplierOrderDto> for SupplierOrder {
    type Error = String;

    fn try_from(dto: SupplierOrderDto) -> Result<Self, Self::Error> {
        let id = dto
            .order_id
            .or(dto.id)
            .ok_or_else(|| format!("order from {} has neither order_id nor id", dto.supplier))?;

        if dto.supplier.trim().is_empty() {
            return Err(format!("order {} has an empty supplier", id));
        }

        Ok(SupplierOrder {
            order_id: OrderId::new(id),
            date: dto.date,
            supplier: dto.supplier,
            items: dto.items.unwrap_or_default(),
            total: dto.total,
            status: dto.status,
            // пустые строки из Django приходят вместо null
            order_number: dto.order_number.filter(|s| !s.is_empty()),
            tracking: dto.tracking.filter(|s| !s.is_empty()),
            expected_date: dto.expected_date,
            received_date: dto.received_date,
            notes: dto.notes.filter(|s| !s.is_empty()),
        })
    }
}

/// Ответ внешнего API на `GET <endpoint>?page=1&pageSize=N`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrderListResponse {
    #[serde(default)]
    pub total: Option<usize>,
    pub data: Vec<SupplierOrderDto>,
}

/// Ответ нашего `GET /api/supplier-orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub data: Vec<SupplierOrder>,
}

impl From<PageResult> for OrderListResponse {
    fn from(r: PageResult) -> Self {
        Self {
            total: r.total,
            page: r.current_page,
            page_size: r.page_size,
            total_pages: r.total_pages,
            data: r.visible_orders,
        }
    }
}

/// Обёртка `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
