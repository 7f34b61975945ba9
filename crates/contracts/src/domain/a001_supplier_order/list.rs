//! Фильтрация, сортировка и пагинация списка заказов поставщикам.
//!
//! Все функции чистые: исходная коллекция не изменяется, порядок заказов
//! сохраняется, если сортировка не запрошена явно.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::aggregate::SupplierOrder;

/// Размер страницы списка заказов в UI
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Поле сортировки списка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Total,
    Status,
}

/// Явная сортировка: `date`, `-total` и т.п.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSort {
    pub key: SortKey,
    pub descending: bool,
}

impl OrderSort {
    /// Разбор параметра `sort`: ведущий `-` означает убывание.
    /// Неизвестные поля игнорируются (None).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let descending = raw.starts_with('-');
        let key = match raw.trim_start_matches('-') {
            "date" => SortKey::Date,
            "total" => SortKey::Total,
            "status" => SortKey::Status,
            _ => return None,
        };
        Some(Self { key, descending })
    }

    fn compare(&self, a: &SupplierOrder, b: &SupplierOrder) -> Ordering {
        let ord = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Total => a.total.total_cmp(&b.total),
            SortKey::Status => a.status.code().cmp(b.status.code()),
        };
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// Запрос списка: фильтры + страница
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub supplier: Option<String>,
    pub status: Option<String>,
    pub query: Option<String>,
    pub sort: Option<OrderSort>,
    /// Номер страницы, начиная с 1
    pub page: usize,
    pub page_size: usize,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            supplier: None,
            status: None,
            query: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl OrderListQuery {
    /// Тот же фильтр, но другая страница
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Проходит ли заказ все активные фильтры
    pub fn matches(&self, order: &SupplierOrder) -> bool {
        if let Some(supplier) = active(&self.supplier) {
            if order.supplier.to_lowercase() != supplier {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if order.status.code() != status {
                return false;
            }
        }
        match active(&self.query) {
            Some(q) => search_haystack(order).contains(&q),
            None => true,
        }
    }
}

/// Результат пагинации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub visible_orders: Vec<SupplierOrder>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Количество заказов после фильтрации
    pub total: usize,
    pub page_size: usize,
}

impl PageResult {
    /// Кнопка "Prev" доступна
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Кнопка "Next" доступна
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Значение фильтра после trim + lowercase; пустое значение неактивно
fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Строка поиска: id, поставщик, дата и все `sku title` через пробел, в нижнем регистре
pub fn search_haystack(order: &SupplierOrder) -> String {
    let items = order
        .items
        .iter()
        .map(|i| format!("{} {}", i.sku, i.title))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{} {} {} {}",
        order.order_id,
        order.supplier,
        order.date_iso(),
        items
    )
    .to_lowercase()
}

/// `max(1, ceil(count / page_size))`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Отфильтрованный (и, если запрошено, отсортированный) набор заказов
pub fn filter_orders(orders: &[SupplierOrder], request: &OrderListQuery) -> Vec<SupplierOrder> {
    let mut filtered: Vec<SupplierOrder> = orders
        .iter()
        .filter(|o| request.matches(o))
        .cloned()
        .collect();

    if let Some(sort) = request.sort {
        // sort_by стабильна: при равенстве ключей сохраняется исходный порядок
        filtered.sort_by(|a, b| sort.compare(a, b));
    }

    filtered
}

/// Срез страницы `filtered[(page-1)*page_size .. page*page_size]`.
///
/// Страница вне диапазона не корректируется: вызывающий код сам
/// ограничивает номер страницы, здесь получится пустой срез.
pub fn paginate(orders: &[SupplierOrder], request: &OrderListQuery) -> PageResult {
    let filtered = filter_orders(orders, request);
    let page_size = request.page_size.max(1);
    let start = request.page.saturating_sub(1).saturating_mul(page_size);

    PageResult {
        total_pages: total_pages(filtered.len(), page_size),
        total: filtered.len(),
        visible_orders: filtered.into_iter().skip(start).take(page_size).collect(),
        current_page: request.page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_supplier_order::aggregate::OrderStatus;
    use crate::domain::a001_supplier_order::sample::sample_orders;

    fn ids(orders: &[SupplierOrder]) -> Vec<i64> {
        orders.iter().map(|o| o.order_id.value()).collect()
    }

    fn query() -> OrderListQuery {
        OrderListQuery::default()
    }

    #[test]
    fn test_first_page_of_samples() {
        let result = paginate(&sample_orders(), &query());
        assert_eq!(ids(&result.visible_orders), vec![1001, 1002, 1003, 1004, 1005, 1006]);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.total, 12);
        assert!(!result.has_prev());
        assert!(result.has_next());
    }

    #[test]
    fn test_second_page_of_samples() {
        let result = paginate(&sample_orders(), &query().with_page(2));
        assert_eq!(ids(&result.visible_orders), vec![1007, 1008, 1009, 1010, 1011, 1012]);
        assert!(result.has_prev());
        assert!(!result.has_next());
    }

    #[test]
    fn test_supplier_filter_is_case_insensitive() {
        let request = OrderListQuery {
            supplier: Some("  acme BOOKS ".to_string()),
            ..query()
        };
        let result = paginate(&sample_orders(), &request);
        assert_eq!(ids(&result.visible_orders), vec![1001, 1003, 1007, 1011]);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_status_filter() {
        let request = OrderListQuery {
            status: Some("Received".to_string()),
            ..query()
        };
        assert_eq!(ids(&filter_orders(&sample_orders(), &request)), vec![1001, 1006, 1007]);
    }

    #[test]
    fn test_query_matches_id_sku_title_and_date() {
        let by_id = OrderListQuery { query: Some("1009".into()), ..query() };
        assert_eq!(ids(&filter_orders(&sample_orders(), &by_id)), vec![1009]);

        let by_sku = OrderListQuery { query: Some("bk-13".into()), ..query() };
        assert_eq!(ids(&filter_orders(&sample_orders(), &by_sku)), vec![1008]);

        let by_title = OrderListQuery { query: Some("machine".into()), ..query() };
        assert_eq!(ids(&filter_orders(&sample_orders(), &by_title)), vec![1011]);

        let by_month = OrderListQuery { query: Some("2025-12".into()), ..query() };
        assert_eq!(
            ids(&filter_orders(&sample_orders(), &by_month)),
            vec![1003, 1004, 1008, 1011, 1012]
        );
    }

    #[test]
    fn test_filters_compose_as_and() {
        let request = OrderListQuery {
            supplier: Some("Pages & Co".into()),
            status: Some("pending".into()),
            query: Some("cloud".into()),
            ..query()
        };
        let result = paginate(&sample_orders(), &request);
        assert_eq!(ids(&result.visible_orders), vec![1012]);
        for order in &result.visible_orders {
            assert!(request.matches(order));
            assert_eq!(order.status, OrderStatus::Pending);
        }
    }

    #[test]
    fn test_zero_matches_yields_single_empty_page() {
        let request = OrderListQuery { supplier: Some("Nobody".into()), ..query() };
        let result = paginate(&sample_orders(), &request);
        assert!(result.visible_orders.is_empty());
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.current_page, 1);
    }

    #[test]
    fn test_empty_source_has_one_page() {
        let result = paginate(&[], &query());
        assert_eq!(result.total_pages, 1);
        assert!(result.visible_orders.is_empty());
    }

    #[test]
    fn test_out_of_range_page_is_not_clamped() {
        let result = paginate(&sample_orders(), &query().with_page(5));
        assert_eq!(result.current_page, 5);
        assert!(result.visible_orders.is_empty());
    }

    #[test]
    fn test_source_is_not_mutated() {
        let orders = sample_orders();
        let request = OrderListQuery {
            sort: OrderSort::parse("-total"),
            ..query()
        };
        let _ = paginate(&orders, &request);
        assert_eq!(orders, sample_orders());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            OrderSort::parse("-date"),
            Some(OrderSort { key: SortKey::Date, descending: true })
        );
        assert_eq!(
            OrderSort::parse("status"),
            Some(OrderSort { key: SortKey::Status, descending: false })
        );
        assert_eq!(OrderSort::parse("supplier"), None);
    }

    #[test]
    fn test_sort_by_total_is_stable() {
        let request = OrderListQuery {
            sort: OrderSort::parse("-total"),
            page_size: 12,
            ..query()
        };
        let result = paginate(&sample_orders(), &request);
        // 1007 и 1008 оба по 120 - порядок источника сохраняется
        assert_eq!(
            ids(&result.visible_orders),
            vec![1003, 1011, 1009, 1001, 1007, 1008, 1002, 1006, 1012, 1004, 1010, 1005]
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(12, 6), 2);
        assert_eq!(total_pages(5, 0), 1);
    }
}
