use std::collections::BTreeSet;

use super::aggregate::{OrderId, SupplierOrder};
use super::export::orders_to_csv;
use super::list::{filter_orders, paginate, total_pages, OrderListQuery, PageResult};
use crate::shared::export::ExportError;

/// Состояние кнопок пагинации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// "Page 1 of 2"
    pub label: String,
}

/// Состояние экрана истории заказов.
///
/// Коллекция загружается один раз; фильтр и страница меняются только
/// через переходы, которые возвращают новое состояние.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderHistoryState {
    orders: Vec<SupplierOrder>,
    filter: OrderListQuery,
}

impl OrderHistoryState {
    pub fn new(orders: Vec<SupplierOrder>) -> Self {
        Self {
            orders,
            filter: OrderListQuery::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.filter.page_size = page_size.max(1);
        self.filter.page = 1;
        self
    }

    pub fn orders(&self) -> &[SupplierOrder] {
        &self.orders
    }

    pub fn filter(&self) -> &OrderListQuery {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.filter.page
    }

    /// Новый фильтр всегда сбрасывает на первую страницу
    pub fn with_filter(self, filter: OrderListQuery) -> Self {
        let page_size = self.filter.page_size;
        Self {
            orders: self.orders,
            filter: OrderListQuery {
                page: 1,
                page_size,
                ..filter
            },
        }
    }

    /// Переход на страницу, номер ограничивается диапазоном [1, total_pages]
    pub fn go_to_page(self, page: usize) -> Self {
        let last = self.total_pages();
        let page = page.clamp(1, last);
        Self {
            filter: self.filter.with_page(page),
            orders: self.orders,
        }
    }

    pub fn prev_page(self) -> Self {
        let page = self.filter.page.saturating_sub(1);
        self.go_to_page(page)
    }

    pub fn next_page(self) -> Self {
        let page = self.filter.page + 1;
        self.go_to_page(page)
    }

    pub fn filtered(&self) -> Vec<SupplierOrder> {
        filter_orders(&self.orders, &self.filter)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.filter.page_size)
    }

    pub fn page_result(&self) -> PageResult {
        paginate(&self.orders, &self.filter)
    }

    pub fn controls(&self) -> PaginationControls {
        let total = self.total_pages();
        let page = self.filter.page;
        PaginationControls {
            prev_enabled: page > 1,
            next_enabled: page < total,
            label: format!("Page {} of {}", page, total),
        }
    }

    /// Поставщики для выпадающего списка: уникальные, по алфавиту
    pub fn suppliers(&self) -> Vec<String> {
        supplier_names(&self.orders)
    }

    /// Поиск по всей коллекции, а не только по видимой странице
    pub fn find_order(&self, id: OrderId) -> Option<&SupplierOrder> {
        self.orders.iter().find(|o| o.order_id == id)
    }

    /// CSV по всему отфильтрованному набору
    pub fn export_csv(&self) -> Result<String, ExportError> {
        orders_to_csv(&self.filtered())
    }
}

/// Уникальные имена поставщиков по алфавиту
pub fn supplier_names(orders: &[SupplierOrder]) -> Vec<String> {
    orders
        .iter()
        .map(|o| o.supplier.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_supplier_order::sample::sample_orders;

    fn state() -> OrderHistoryState {
        OrderHistoryState::new(sample_orders())
    }

    #[test]
    fn test_initial_controls() {
        let controls = state().controls();
        assert_eq!(
            controls,
            PaginationControls {
                prev_enabled: false,
                next_enabled: true,
                label: "Page 1 of 2".to_string(),
            }
        );
    }

    #[test]
    fn test_filter_change_resets_page() {
        let st = state().next_page();
        assert_eq!(st.current_page(), 2);

        let st = st.with_filter(OrderListQuery {
            status: Some("pending".into()),
            page: 2,
            ..OrderListQuery::default()
        });
        assert_eq!(st.current_page(), 1);
        assert_eq!(st.page_result().visible_orders.len(), 3);
    }

    #[test]
    fn test_go_to_page_is_clamped() {
        assert_eq!(state().go_to_page(9).current_page(), 2);
        assert_eq!(state().go_to_page(0).current_page(), 1);
        assert_eq!(state().prev_page().current_page(), 1);
        let last = state().next_page();
        assert!(!last.controls().next_enabled);
        assert_eq!(last.next_page().current_page(), 2);
    }

    #[test]
    fn test_suppliers_sorted_unique() {
        assert_eq!(
            state().suppliers(),
            vec!["Acme Books", "Global Texts", "Novelty Distributors", "Pages & Co"]
        );
    }

    #[test]
    fn test_find_order_outside_visible_page() {
        let st = state();
        assert!(st.find_order(OrderId(1012)).is_some());
        assert!(st.find_order(OrderId(42)).is_none());
    }

    #[test]
    fn test_export_covers_filtered_not_visible() {
        let st = state()
            .with_page_size(2)
            .with_filter(OrderListQuery {
                supplier: Some("Acme Books".into()),
                ..OrderListQuery::default()
            });
        assert_eq!(st.page_result().visible_orders.len(), 2);
        let csv = st.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 5);
    }
}
