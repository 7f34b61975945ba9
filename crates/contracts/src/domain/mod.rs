pub mod a001_supplier_order;
pub mod a002_purchase_order_form;
pub mod common;
