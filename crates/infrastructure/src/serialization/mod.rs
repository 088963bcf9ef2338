//! Serialization helpers for persisted files.

mod json;

pub use json::*;
