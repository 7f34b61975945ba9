use contracts::domain::a001_supplier_order::export::orders_to_csv;
use contracts::domain::a001_supplier_order::view::supplier_names;
use contracts::domain::a001_supplier_order::{
    filter_orders, paginate, OrderId, OrderListQuery, PageResult, SupplierOrder,
};
use contracts::domain::common::Origin;
use contracts::shared::export::ExportError;

use super::source::{LoadedOrders, OrderSource};

/// Коллекция заказов, загруженная один раз при старте.
/// После загрузки только читается.
#[derive(Debug, Clone)]
pub struct OrderStore {
    origin: Origin,
    orders: Vec<SupplierOrder>,
}

impl OrderStore {
    pub fn new(loaded: LoadedOrders) -> Self {
        for order in loaded.orders.iter().filter(|o| !o.total_matches_items()) {
            tracing::warn!(
                "Order {} total {:.2} differs from line items sum {:.2}",
                order.order_id,
                order.total,
                order.computed_total()
            );
        }

        Self {
            origin: loaded.origin,
            orders: loaded.orders,
        }
    }

    /// Загрузить коллекцию из источника
    pub async fn load(source: &dyn OrderSource) -> anyhow::Result<Self> {
        let loaded = source
            .fetch_orders()
            .await
            .map_err(|e| anyhow::anyhow!("order source '{}' failed: {}", source.name(), e))?;

        tracing::info!(
            "Loaded {} supplier orders (origin: {})",
            loaded.orders.len(),
            loaded.origin
        );

        Ok(Self::new(loaded))
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn list(&self, query: &OrderListQuery) -> PageResult {
        paginate(&self.orders, query)
    }

    pub fn get_by_id(&self, id: OrderId) -> Option<&SupplierOrder> {
        self.orders.iter().find(|o| o.order_id == id)
    }

    pub fn suppliers(&self) -> Vec<String> {
        supplier_names(&self.orders)
    }

    /// CSV по всему отфильтрованному набору (страница игнорируется)
    pub fn export_csv(&self, query: &OrderListQuery) -> Result<String, ExportError> {
        orders_to_csv(&filter_orders(&self.orders, query))
    }
}
