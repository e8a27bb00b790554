//! # Tool Registry
//!
//! Data-transform tools runnable by `dash <tool> [args...]`.
//!
//! Each tool receives the store loaded from `--data`, its positional
//! arguments and the active configuration. Tools that modify the graph are
//! marked `writes`; the CLI persists the store only after those.
//!
//! ## Available Tools
//!
//! - `add-layout` - Grid-place every component in a named view
//! - `example-components` - Add sample components for testing
//! - `layouts` - List view names in use
//! - `dangling` - List references to missing entities
//! - `status` - Show entity counts
//! - `view` - Print one view as a renderer would draw it

mod add_layout;
mod dangling;
pub mod example_components;
mod layouts;
mod status;
mod view;

use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::MemoryStore;

/// Signature shared by every tool.
pub type ToolFn = fn(&mut MemoryStore, &[String], &DashConfig) -> Result<ToolReport, DashError>;

/// A registered tool.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub name: &'static str,
    pub summary: &'static str,
    /// Whether the store is saved after the tool runs.
    pub writes: bool,
    pub run: ToolFn,
}

/// What a tool produced, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolReport {
    /// One-line human summary.
    pub summary: String,
    /// Detail lines printed under the summary.
    pub lines: Vec<String>,
    /// Machine-readable result for `--json-mode`.
    pub data: serde_json::Value,
}

impl ToolReport {
    pub(crate) fn new(summary: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            summary: summary.into(),
            lines: Vec::new(),
            data,
        }
    }

    pub(crate) fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }
}

const REGISTRY: &[Tool] = &[
    Tool {
        name: "add-layout",
        summary: "Grid-place every component in a named view",
        writes: true,
        run: add_layout::run,
    },
    Tool {
        name: "example-components",
        summary: "Add sample components for testing",
        writes: true,
        run: example_components::run,
    },
    Tool {
        name: "layouts",
        summary: "List view names in use",
        writes: false,
        run: layouts::run,
    },
    Tool {
        name: "dangling",
        summary: "List references to missing entities",
        writes: false,
        run: dangling::run,
    },
    Tool {
        name: "status",
        summary: "Show entity counts",
        writes: false,
        run: status::run,
    },
    Tool {
        name: "view",
        summary: "Print one view as a renderer would draw it",
        writes: false,
        run: view::run,
    },
];

/// Every registered tool, in listing order.
#[must_use]
pub fn registry() -> &'static [Tool] {
    REGISTRY
}

/// Comma-separated tool names, for error messages.
#[must_use]
pub fn available() -> String {
    REGISTRY
        .iter()
        .map(|tool| tool.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `name - summary` line per tool.
#[must_use]
pub fn listing() -> String {
    REGISTRY
        .iter()
        .map(|tool| format!("  {:<20} {}", tool.name, tool.summary))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up a tool by name.
pub fn find(name: &str) -> Result<&'static Tool, DashError> {
    REGISTRY
        .iter()
        .find(|tool| tool.name == name)
        .ok_or_else(|| DashError::UnknownTool {
            name: name.to_string(),
            available: available(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
