pub mod service;
pub mod source;
