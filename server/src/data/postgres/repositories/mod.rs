//! PostgreSQL repositories
//!
//! Free async functions over the shared pool, one module per table.

pub mod device;
pub mod quote;
pub mod ranking;
pub mod report;
pub mod user;
pub mod vote;
