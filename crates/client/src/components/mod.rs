//! Reusable presentation components.

pub mod data_table;
pub mod modal;

pub use data_table::{DataTable, FilterOption, TableColumn, TableView};
pub use modal::Modal;
