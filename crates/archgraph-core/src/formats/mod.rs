//! # Formats
//!
//! Serialization of Graph Documents. File I/O lives in the app layer.

pub mod json;

pub use json::{document_from_json, document_to_json};
