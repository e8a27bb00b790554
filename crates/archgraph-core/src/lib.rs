//! # archgraph-core
//!
//! The in-memory graph store for architecture diagrams.
//!
//! A diagram is a set of components, groups of components, and directed
//! edges between them. All three share one id namespace, carry optional
//! typed facts, and may be laid out independently in any number of named
//! views.
//!
//! ## Architectural Constraints
//!
//! - The store is the only mutable owner of the graph; values crossing its
//!   boundary are copies
//! - Pure Rust: no async, no network, no file I/O
//! - Persistence is the caller's concern: `formats` converts a
//!   `GraphDocument` to and from JSON bytes

// =============================================================================
// MODULES
// =============================================================================

pub mod document;
pub mod formats;
pub mod ids;
pub mod layout;
pub mod merge;
pub mod primitives;
pub mod store;
pub mod types;
pub mod view;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AnnualCost, ApiSpecification, ApiType, CmdbFacts, Component, ComponentUpdate, Contributor,
    Document, Edge, EdgeLayouts, EdgeUpdate, Entity, EntityKind, FactKey, Facts, GitInfo, Group,
    GroupUpdate, JourneyStepFacts, KafkaInfo, LayoutInfo, LayoutPatch, Layouts, Link,
    LintingIssues, MonthCommitCount, MonthlyCommits, Placed, Placement, Platform, PlatformType,
    Position, QualityMetrics, Repository, Size, Solution, SolutionArchitect, StoreError,
    Subcomponent, Team, TechStackItem,
};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use document::{DanglingReference, GraphDocument, ReferenceField};
pub use ids::IdIndex;
pub use layout::LayoutEngine;
pub use merge::FactMerge;
pub use store::{GraphStore, MemoryStore};
pub use view::{LayoutView, ViewEdge, ViewNode};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{document_from_json, document_to_json};
