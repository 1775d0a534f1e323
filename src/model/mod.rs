//! Database models module
//!
//! All database entity structs are consolidated in models.rs; table.rs holds
//! the generic pool handle used by the DAO layer.

mod models;
mod table;

pub use models::*;
pub use table::Table;
