pub mod a001_supplier_order;
