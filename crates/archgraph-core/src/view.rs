//! # Layout View
//!
//! Projection of a Graph Document onto one named layout, in the shape a
//! diagram renderer consumes.
//!
//! - Components always appear. Those without a layout in the view fall back
//!   to a grid position by document index.
//! - Groups appear only when positioned in the view.
//! - Edges appear only when marked visible in the view.

use crate::primitives::{
    DEFAULT_GROUP_BACKGROUND, DEFAULT_NODE_TYPE, GROUP_NODE_TYPE, VIEW_GRID_COLUMNS,
    VIEW_GRID_STEP_X, VIEW_GRID_STEP_Y,
};
use crate::{EntityKind, GraphDocument};
use serde::{Deserialize, Serialize};

/// A node of the projected view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
    pub node_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// False when the position came from the fallback grid.
    pub positioned: bool,
}

/// An edge visible in the projected view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Everything a renderer needs to draw one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutView {
    pub layout: String,
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl LayoutView {
    /// Project `document` onto `layout`. Component nodes come first, then groups.
    #[must_use]
    pub fn project(document: &GraphDocument, layout: &str) -> Self {
        let components = document.components.iter().enumerate().map(|(index, c)| {
            match c.layouts.get(layout) {
                Some(info) => ViewNode {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    kind: EntityKind::Component,
                    node_type: info.node_type.clone(),
                    x: info.x,
                    y: info.y,
                    width: info.width,
                    height: info.height,
                    background_color: info.background_color.clone(),
                    positioned: true,
                },
                None => {
                    let (x, y) = grid_position(index);
                    ViewNode {
                        id: c.id.clone(),
                        label: c.label.clone(),
                        kind: EntityKind::Component,
                        node_type: DEFAULT_NODE_TYPE.to_string(),
                        x,
                        y,
                        width: None,
                        height: None,
                        background_color: None,
                        positioned: false,
                    }
                }
            }
        });

        let groups = document.groups.iter().filter_map(|g| {
            let info = g.layouts.get(layout)?;
            Some(ViewNode {
                id: g.id.clone(),
                label: g.label.clone(),
                kind: EntityKind::Group,
                node_type: GROUP_NODE_TYPE.to_string(),
                x: info.x,
                y: info.y,
                width: info.width,
                height: info.height,
                background_color: Some(
                    info.background_color
                        .clone()
                        .unwrap_or_else(|| DEFAULT_GROUP_BACKGROUND.to_string()),
                ),
                positioned: true,
            })
        });

        let edges = document
            .edges
            .iter()
            .filter(|e| e.layouts.get(layout).copied().unwrap_or(false))
            .map(|e| ViewEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
                label: e.label.clone(),
            })
            .collect();

        Self {
            layout: layout.to_string(),
            nodes: components.chain(groups).collect(),
            edges,
        }
    }

    /// Find a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Fallback grid slot for the component at `index`.
fn grid_position(index: usize) -> (f64, f64) {
    let column = index % VIEW_GRID_COLUMNS;
    let row = index / VIEW_GRID_COLUMNS;
    (column as f64 * VIEW_GRID_STEP_X, row as f64 * VIEW_GRID_STEP_Y)
}

// =============================================================================
// TESTS
// =============================================================================
