use super::aggregate::SupplierOrder;
use crate::shared::export::{export_to_csv, CsvExportable, ExportError};
use crate::shared::format::round_cents;

/// Имя файла при скачивании
pub const CSV_FILE_NAME: &str = "supplier_orders.csv";

impl CsvExportable for SupplierOrder {
    fn headers() -> Vec<&'static str> {
        vec!["order_id", "date", "supplier", "items", "total", "status"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.date_iso(),
            self.supplier.clone(),
            flatten_items(self),
            format!("{:.2}", round_cents(self.total)),
            self.status.code().to_string(),
        ]
    }
}

/// Строки заказа в одну ячейку: `sku:qty|sku:qty`
pub fn flatten_items(order: &SupplierOrder) -> String {
    order
        .items
        .iter()
        .map(|i| format!("{}:{}", i.sku, i.qty))
        .collect::<Vec<_>>()
        .join("|")
}

/// CSV по переданному (уже отфильтрованному) набору заказов
pub fn orders_to_csv(orders: &[SupplierOrder]) -> Result<String, ExportError> {
    export_to_csv(orders)
}
