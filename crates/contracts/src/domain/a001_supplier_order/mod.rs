pub mod aggregate;
pub mod dto;
pub mod export;
pub mod list;
pub mod sample;
pub mod view;

pub use aggregate::{LineItem, OrderId, OrderStatus, SupplierOrder};
pub use list::{filter_orders, paginate, OrderListQuery, OrderSort, PageResult, DEFAULT_PAGE_SIZE};
