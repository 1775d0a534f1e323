pub mod postgre;

pub use postgre::{DBRow, DataBase, PoolOption, PoolType, QueryResult};
