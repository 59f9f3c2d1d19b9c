//! Data layer
//!
//! PostgreSQL-backed storage: service, schema, repositories, and row types.

pub mod error;
pub mod postgres;
pub mod types;

pub use error::DataError;
pub use postgres::{PgPool, PostgresError, PostgresService};
