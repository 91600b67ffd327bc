//! Database layer - connection pool, schema and stores
//!
//! # Design Principles
//!
//! - Connection pool sized by `--max-connections` (default 5) - no Arc<Mutex<Connection>>
//! - Unique email enforced by the DB, violations surface as `DbError::Conflict`
//! - Grade inserts are checked against the owner by the service; the FK backs that up
//! - Transactions for multi-step operations
//! - One `GradebookStore` trait, one Postgres and one in-memory backend

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{DbError, GradebookStore};
