//! Общие типы и чистая логика для истории заказов поставщикам.
//!
//! Крейт не выполняет ввода-вывода: загрузка данных и HTTP живут в `backend`.

pub mod domain;
pub mod shared;
