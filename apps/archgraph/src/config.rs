//! # Configuration
//!
//! Optional `dash.toml` settings. Every key may be omitted.
//!
//! ```toml
//! data = "data/graph.json"
//! out = "data/graph.json"
//! default_layout = "default"
//! grid_columns = 10
//! grid_spacing = 150.0
//! node_type = "componentDetails"
//! example_count = 10
//! ```
//!
//! Command-line flags and their environment variables take precedence over
//! `data` and `out` from the file.

use crate::DashError;
use crate::tools::example_components::MAX_EXAMPLE_COUNT;
use archgraph_core::primitives::{DEFAULT_LAYOUT, DEFAULT_NODE_TYPE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "dash.toml";

/// Settings shared by all tools.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashConfig {
    /// Input document used when `--data` is not given.
    pub data: Option<PathBuf>,
    /// Output document used when `--out` is not given.
    pub out: Option<PathBuf>,
    /// View used by tools that take an optional layout name.
    pub default_layout: String,
    /// Columns of the placement grid.
    pub grid_columns: usize,
    /// Distance between grid cells on both axes.
    pub grid_spacing: f64,
    /// Node type given to grid-placed components.
    pub node_type: String,
    /// Components created by `example-components` without a count argument.
    pub example_count: usize,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data: None,
            out: None,
            default_layout: DEFAULT_LAYOUT.to_string(),
            grid_columns: 10,
            grid_spacing: 150.0,
            node_type: DEFAULT_NODE_TYPE.to_string(),
            example_count: 10,
        }
    }
}

impl DashConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, DashError> {
        let config: Self = toml::from_str(text).map_err(|e| DashError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `dash.toml` in the working
    /// directory is used if present, otherwise defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, DashError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                let exists = tokio::fs::try_exists(&fallback)
                    .await
                    .map_err(|e| DashError::io(&fallback, e))?;
                if !exists {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DashError::io(&path, e))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), DashError> {
        if self.grid_columns == 0 {
            return Err(DashError::Config("grid_columns must be at least 1".to_string()));
        }
        if !self.grid_spacing.is_finite() {
            return Err(DashError::Config("grid_spacing must be a finite number".to_string()));
        }
        if self.example_count == 0 || self.example_count > MAX_EXAMPLE_COUNT {
            return Err(DashError::Config(format!(
                "example_count must be between 1 and {}",
                MAX_EXAMPLE_COUNT
            )));
        }
        Ok(())
    }

    /// Grid cell for the item at `index`.
    #[must_use]
    pub fn grid_position(&self, index: usize, spacing: f64) -> (f64, f64) {
        let column = index % self.grid_columns;
        let row = index / self.grid_columns;
        (column as f64 * spacing, row as f64 * spacing)
    }
}

// =============================================================================
// TESTS
// =============================================================================
