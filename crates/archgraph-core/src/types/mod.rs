//! # Core Type Definitions
//!
//! This module contains the entity model of the component graph:
//! - Entity kinds (`Component`, `Group`, `Edge`) and the `EntityKind` tag
//! - Per-view placement records (`LayoutInfo`, `Layouts`, `EdgeLayouts`)
//! - Partial update records (`ComponentUpdate`, `GroupUpdate`, `EdgeUpdate`, `LayoutPatch`)
//! - Error types (`StoreError`)
//!
//! All types serialize with camelCase keys so they match the Graph Document
//! JSON format exchanged with the CLI and the UI.
//!
//! ## Identifiers
//!
//! An empty `id` on an entity passed to an add operation means "unset": the
//! store allocates one. Ids never change after an entity has been added.

pub mod facts;

pub use facts::{
    AnnualCost, ApiSpecification, ApiType, CmdbFacts, Contributor, Document, FactKey, Facts,
    GitInfo, JourneyStepFacts, KafkaInfo, Link, LintingIssues, MonthCommitCount, MonthlyCommits,
    Platform, PlatformType, QualityMetrics, Repository, Solution, SolutionArchitect,
    Subcomponent, TechStackItem, Team,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// ENTITY KIND
// =============================================================================

/// The three kinds of entity sharing one identifier namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Component,
    Group,
    Edge,
}

impl EntityKind {
    /// Lowercase name used in messages and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Group => "group",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// LAYOUTS
// =============================================================================

/// Placement of a component or group in one named view.
///
/// `x`/`y` are required. Width and height are only set once the node has been
/// resized; `node_type` is a rendering hint for the diagram library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl LayoutInfo {
    /// Create a layout at the given position with no size or color.
    #[must_use]
    pub fn at(x: f64, y: f64, node_type: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
            node_type: node_type.into(),
            background_color: None,
        }
    }

    /// Builder: set width and height.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Builder: set the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

/// Layout name -> placement. Absence of a name means "not positioned in that view".
pub type Layouts = BTreeMap<String, LayoutInfo>;

/// Layout name -> visibility. Edges are drawn between nodes, never placed.
pub type EdgeLayouts = BTreeMap<String, bool>;

/// Partial update of a `LayoutInfo`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub node_type: Option<String>,
    pub background_color: Option<String>,
}

/// A position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Dimensions of a resized node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A drag and/or resize applied to a node in one view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Option<Position>,
    pub size: Option<Size>,
}

impl Placement {
    /// A pure move.
    #[must_use]
    pub fn moved_to(x: f64, y: f64) -> Self {
        Self {
            position: Some(Position { x, y }),
            size: None,
        }
    }

    /// A pure resize.
    #[must_use]
    pub fn resized_to(width: f64, height: f64) -> Self {
        Self {
            position: None,
            size: Some(Size { width, height }),
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A deployable or logical component of the architecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub facts: Facts,
    #[serde(default)]
    pub layouts: Layouts,
}

impl Component {
    /// Create a component with no facts and no layouts.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }
}

/// A visual container of components. Membership is advisory only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub component_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Facts::is_empty")]
    pub facts: Facts,
    #[serde(default)]
    pub layouts: Layouts,
}

impl Group {
    /// Create a group containing the given component ids.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        component_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            component_ids: component_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A directed relation between two components or groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub facts: Facts,
    #[serde(default)]
    pub layouts: EdgeLayouts,
}

impl Edge {
    /// Create an edge between `source` and `target`.
    #[must_use]
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// ENTITY TRAITS
// =============================================================================

/// Common surface of the three entity kinds.
///
/// Lets the store resolve, allocate and merge facts generically instead of
/// repeating the same code per collection.
pub trait Entity: Clone {
    /// The kind tag used in errors.
    const KIND: EntityKind;

    /// The entity identifier (empty when unset).
    fn id(&self) -> &str;

    /// Assign the identifier. Only the store calls this, at add time.
    fn set_id(&mut self, id: String);

    /// The entity's facts.
    fn facts(&self) -> &Facts;

    /// Mutable access to the entity's facts.
    fn facts_mut(&mut self) -> &mut Facts;
}

/// Entities placed with a structured `LayoutInfo` per view (components and groups).
pub trait Placed: Entity {
    /// The entity's layouts.
    fn layouts(&self) -> &Layouts;

    /// Mutable access to the entity's layouts.
    fn layouts_mut(&mut self) -> &mut Layouts;
}

macro_rules! impl_entity {
    ($ty:ty, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn facts(&self) -> &Facts {
                &self.facts
            }

            fn facts_mut(&mut self) -> &mut Facts {
                &mut self.facts
            }
        }
    };
}

impl_entity!(Component, EntityKind::Component);
impl_entity!(Group, EntityKind::Group);
impl_entity!(Edge, EntityKind::Edge);

impl Placed for Component {
    fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    fn layouts_mut(&mut self) -> &mut Layouts {
        &mut self.layouts
    }
}

impl Placed for Group {
    fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    fn layouts_mut(&mut self) -> &mut Layouts {
        &mut self.layouts
    }
}

// =============================================================================
// FIELD UPDATES
// =============================================================================

/// Targeted field update for a component. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentUpdate {
    pub label: Option<String>,
    pub description: Option<String>,
}

/// Targeted field update for a group. `component_ids` replaces the list wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupUpdate {
    pub label: Option<String>,
    pub description: Option<String>,
    pub component_ids: Option<Vec<String>>,
}

/// Targeted field update for an edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeUpdate {
    pub source: Option<String>,
    pub target: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl ComponentUpdate {
    pub(crate) fn apply(&self, component: &mut Component) {
        if let Some(label) = &self.label {
            component.label.clone_from(label);
        }
        if let Some(description) = &self.description {
            component.description.clone_from(description);
        }
    }
}

impl GroupUpdate {
    pub(crate) fn apply(&self, group: &mut Group) {
        if let Some(label) = &self.label {
            group.label.clone_from(label);
        }
        if let Some(description) = &self.description {
            group.description.clone_from(description);
        }
        if let Some(component_ids) = &self.component_ids {
            group.component_ids.clone_from(component_ids);
        }
    }
}

impl EdgeUpdate {
    pub(crate) fn apply(&self, edge: &mut Edge) {
        if let Some(source) = &self.source {
            edge.source.clone_from(source);
        }
        if let Some(target) = &self.target {
            edge.target.clone_from(target);
        }
        if let Some(label) = &self.label {
            edge.label.clone_from(label);
        }
        if let Some(description) = &self.description {
            edge.description.clone_from(description);
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors returned by store operations.
///
/// - No silent failures, no rollback: each call fails on its own
/// - The store never panics; every failure is a value for the caller to handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No entity of this kind has the given id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A batch named ids that no entity of this kind has. The ids that did
    /// resolve were still applied.
    #[error("{kind}s not found: [{}]", .ids.join(", "))]
    NotFoundMany { kind: EntityKind, ids: Vec<String> },

    /// The id is already used by some entity of any kind.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// The entity already has a layout with this name.
    #[error("Layout '{layout}' already exists on {kind} {id}")]
    LayoutAlreadyExists {
        kind: EntityKind,
        id: String,
        layout: String,
    },

    /// The entity has no layout with this name.
    #[error("Layout '{layout}' not found on {kind} {id}")]
    LayoutNotFound {
        kind: EntityKind,
        id: String,
        layout: String,
    },

    /// The allocator could not find a free id within its attempt budget.
    #[error("Could not allocate a free id after {0} attempts")]
    IdSpaceExhausted(usize),

    /// A Graph Document could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// True for both entity-level and layout-level absence.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotFoundMany { .. } | Self::LayoutNotFound { .. }
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
