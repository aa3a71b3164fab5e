// Database layer module

pub mod client;
pub mod pool;
pub mod repositories;
pub mod sql;

pub use client::{DbClient, Record, SqlValue};
pub use pool::DbPool;
