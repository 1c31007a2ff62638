//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - one connection per request
//! - List operations use JOINs - no N+1 queries
//! - Rely on UNIQUE constraints, map violations to conflicts - no check-then-insert
//! - Transactions for multi-step operations (cascade delete, owner check)

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options, DEFAULT_DATABASE_URL};
pub use repos::*;
pub use sqlx::SqlitePool;
