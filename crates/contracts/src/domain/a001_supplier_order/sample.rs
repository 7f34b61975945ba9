use chrono::NaiveDate;
use once_cell::sync::Lazy;

use super::aggregate::{LineItem, OrderStatus, SupplierOrder};

/// Встроенный набор образцов: 12 заказов, подставляется когда внешний источник недоступен
static SAMPLE_ORDERS: Lazy<Vec<SupplierOrder>> = Lazy::new(|| {
    use OrderStatus::*;

    let rows: [(i64, (i32, u32, u32), &str, &str, &str, u32, f64, f64, OrderStatus); 12] = [
        (1001, (2025, 11, 2), "Acme Books", "BK-001", "Intro to JS", 10, 12.5, 125.0, Received),
        (1002, (2025, 11, 15), "Pages & Co", "BK-034", "Advanced CSS", 5, 22.0, 110.0, Shipped),
        (1003, (2025, 12, 1), "Acme Books", "BK-002", "Python 101", 20, 15.0, 300.0, Processing),
        (1004, (2025, 12, 3), "Global Texts", "BK-099", "Algorithms", 2, 45.0, 90.0, Pending),
        (1005, (2025, 11, 28), "Pages & Co", "BK-076", "Design Patterns", 1, 55.0, 55.0, Cancelled),
        (1006, (2025, 10, 10), "Novelty Distributors", "BK-121", "Modern Fiction", 12, 8.0, 96.0, Received),
        (1007, (2025, 9, 7), "Acme Books", "BK-200", "Databases", 4, 30.0, 120.0, Received),
        (1008, (2025, 12, 4), "Global Texts", "BK-132", "Networks", 3, 40.0, 120.0, Shipped),
        (1009, (2025, 11, 21), "Pages & Co", "BK-140", "UX Basics", 7, 18.0, 126.0, Processing),
        (1010, (2025, 11, 30), "Novelty Distributors", "BK-150", "Poetry", 6, 10.0, 60.0, Pending),
        (1011, (2025, 12, 5), "Acme Books", "BK-170", "Machine Learning", 2, 80.0, 160.0, Processing),
        (1012, (2025, 12, 7), "Pages & Co", "BK-177", "Cloud Eng", 1, 95.0, 95.0, Pending),
    ];

    rows.into_iter()
        .filter_map(|(id, (y, m, d), supplier, sku, title, qty, price, total, status)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(SupplierOrder::new(
                id,
                date,
                supplier,
                vec![LineItem::new(sku, title, qty, price)],
                total,
                status,
            ))
        })
        .collect()
});

/// Копия встроенного набора образцов
pub fn sample_orders() -> Vec<SupplierOrder> {
    SAMPLE_ORDERS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_is_complete() {
        let orders = sample_orders();
        assert_eq!(orders.len(), 12);
        let ids: Vec<i64> = orders.iter().map(|o| o.order_id.value()).collect();
        assert_eq!(ids, (1001..=1012).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_totals_match_items() {
        assert!(sample_orders().iter().all(|o| o.total_matches_items()));
    }
}
