//! postboard-server: users and posts over HTTP, stored in SQLite
//!
//! - [`db`]: connection pool, schema migrations, repositories
//! - [`models`]: validated domain types for request input
//! - [`http`]: axum router, handlers, and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ServerConfig};
