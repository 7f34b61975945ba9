use crate::domain::common::AggregateId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Допуск при сверке итога заказа с суммой строк (один цент)
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// ID заказа поставщику
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl OrderId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for OrderId {
    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(OrderId::new)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Статус заказа поставщику
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Received,
    Cancelled,
}

impl OrderStatus {
    /// Код статуса в том виде, в каком он приходит по сети
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Парсинг из строки, без учёта регистра
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "received" => Some(OrderStatus::Received),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Строка заказа: одна позиция SKU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub title: String,
    pub qty: u32,
    pub price: f64,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, title: impl Into<String>, qty: u32, price: f64) -> Self {
        Self {
            sku: sku.into(),
            title: title.into(),
            qty,
            price,
        }
    }

    pub fn line_total(&self) -> f64 {
        f64::from(self.qty) * self.price
    }
}

/// Заказ поставщику (агрегат a001)
///
/// После загрузки не изменяется. `total` хранится как пришёл из источника
/// и не пересчитывается по строкам.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierOrder {
    pub order_id: OrderId,

    /// Дата заказа (YYYY-MM-DD)
    pub date: NaiveDate,

    pub supplier: String,

    #[serde(default)]
    pub items: Vec<LineItem>,

    pub total: f64,

    pub status: OrderStatus,

    /// Номер документа у поставщика (напр. "ORD-1001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SupplierOrder {
    pub fn new(
        order_id: i64,
        date: NaiveDate,
        supplier: impl Into<String>,
        items: Vec<LineItem>,
        total: f64,
        status: OrderStatus,
    ) -> Self {
        Self {
            order_id: OrderId::new(order_id),
            date,
            supplier: supplier.into(),
            items,
            total,
            status,
            order_number: None,
            tracking: None,
            expected_date: None,
            received_date: None,
            notes: None,
        }
    }

    /// Дата в формате ISO 8601
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Сумма qty×price по строкам
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Совпадает ли сохранённый итог с суммой строк
    pub fn total_matches_items(&self) -> bool {
        (self.total - self.computed_total()).abs() < TOTAL_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(total: f64) -> SupplierOrder {
        SupplierOrder::new(
            1,
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            "Acme Books",
            vec![
                LineItem::new("BK-001", "Intro to JS", 10, 12.5),
                LineItem::new("BK-002", "Python 101", 2, 15.0),
            ],
            total,
            OrderStatus::Received,
        )
    }

    #[test]
    fn test_status_codes_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Received,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::from_code("  SHIPPED "), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::from_code("lost"), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_computed_total_and_tolerance() {
        assert_eq!(order(155.0).computed_total(), 155.0);
        assert!(order(155.0).total_matches_items());
        assert!(order(155.004).total_matches_items());
        assert!(!order(150.0).total_matches_items());
    }

    #[test]
    fn test_order_id_from_string() {
        assert_eq!(OrderId::from_string("1007"), Ok(OrderId(1007)));
        assert!(OrderId::from_string("abc").is_err());
    }

    #[test]
    fn test_order_json_shape() {
        let value = serde_json::to_value(order(155.0)).unwrap();
        assert_eq!(value["order_id"], 1);
        assert_eq!(value["date"], "2025-11-02");
        assert_eq!(value["status"], "received");
        assert!(value.get("tracking").is_none());
    }
}
