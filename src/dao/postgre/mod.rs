pub use self::types::{DBRow, DataBase, PoolOption, PoolType, QueryResult};

mod app_user;
mod audit_log;
pub mod document;
pub mod expense;
pub mod inspection;
mod inspection_checklist;
pub mod lease;
pub mod payment;
mod property;
pub mod tenant;
mod types;
pub mod unit;
mod utility_provider;
mod utility_reading;
