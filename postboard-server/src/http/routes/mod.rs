//! Route handlers organized by resource

pub mod health;
pub mod users;
pub mod posts;

use serde::Serialize;

/// Acknowledgement body for mutations that return no record
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
