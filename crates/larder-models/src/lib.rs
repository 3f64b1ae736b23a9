//! Data models for Larder.
//!
//! Defines the core types used throughout the system: food records, the
//! create/update request shapes, and the session user.

mod food;
mod user;

pub use food::*;
pub use user::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
