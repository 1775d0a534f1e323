mod database;

pub use database::DatabasePool;
