//! # archgraph
//!
//! The `dash` command-line tool: loads a Graph Document, runs one data
//! transform tool against an in-memory store, and writes the result back.
//!
//! The binary in `main.rs` only parses arguments and sets up logging;
//! everything it runs lives here so it can be exercised from tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod tools;

pub use error::DashError;
