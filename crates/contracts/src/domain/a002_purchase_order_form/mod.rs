pub mod form;

pub use form::{FormRow, PurchaseOrderForm};
