//! # Graph Document
//!
//! The snapshot format exchanged with the store: three ordered sequences,
//! `components`, `groups` and `edges`, with no envelope.
//!
//! Loading performs no validation beyond JSON shape. Duplicate ids and
//! references to missing entities are reported by `duplicate_ids` and
//! `dangling_references`, never repaired.

use crate::{Component, Edge, EntityKind, Group};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The full component graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Which field of the holder names the missing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceField {
    /// `Edge::source`.
    Source,
    /// `Edge::target`.
    Target,
    /// An entry of `Group::component_ids`.
    Member,
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
            Self::Member => "member",
        })
    }
}

/// A reference from an edge or group to an id no entity holds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub holder_kind: EntityKind,
    pub holder_id: String,
    pub field: ReferenceField,
    pub missing_id: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} (missing)",
            self.holder_kind, self.holder_id, self.field, self.missing_id
        )
    }
}

impl GraphDocument {
    /// A document with no entities.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when all three sequences are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.groups.is_empty() && self.edges.is_empty()
    }

    /// Every id in document order, components then groups then edges.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.components
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.groups.iter().map(|g| g.id.as_str()))
            .chain(self.edges.iter().map(|e| e.id.as_str()))
    }

    /// Ids held by more than one entity, sorted.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for id in self.ids() {
            *counts.entry(id).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect()
    }

    /// Sorted names of every view used by any entity.
    #[must_use]
    pub fn layout_names(&self) -> Vec<String> {
        Self::collect_layout_names(&self.components, &self.groups, &self.edges)
    }

    /// Edges and group memberships naming ids that no longer exist.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        Self::collect_dangling(&self.components, &self.groups, &self.edges)
    }

    pub(crate) fn collect_layout_names(
        components: &[Component],
        groups: &[Group],
        edges: &[Edge],
    ) -> Vec<String> {
        let names: BTreeSet<&String> = components
            .iter()
            .flat_map(|c| c.layouts.keys())
            .chain(groups.iter().flat_map(|g| g.layouts.keys()))
            .chain(edges.iter().flat_map(|e| e.layouts.keys()))
            .collect();
        names.into_iter().cloned().collect()
    }

    /// Edge endpoints must name a component or group; group members must
    /// name a component.
    pub(crate) fn collect_dangling(
        components: &[Component],
        groups: &[Group],
        edges: &[Edge],
    ) -> Vec<DanglingReference> {
        let component_ids: BTreeSet<&str> = components.iter().map(|c| c.id.as_str()).collect();
        let node_ids: BTreeSet<&str> = component_ids
            .iter()
            .copied()
            .chain(groups.iter().map(|g| g.id.as_str()))
            .collect();

        let mut dangling = Vec::new();

        for group in groups {
            for member in &group.component_ids {
                if !component_ids.contains(member.as_str()) {
                    dangling.push(DanglingReference {
                        holder_kind: EntityKind::Group,
                        holder_id: group.id.clone(),
                        field: ReferenceField::Member,
                        missing_id: member.clone(),
                    });
                }
            }
        }

        for edge in edges {
            for (field, endpoint) in [
                (ReferenceField::Source, &edge.source),
                (ReferenceField::Target, &edge.target),
            ] {
                if !node_ids.contains(endpoint.as_str()) {
                    dangling.push(DanglingReference {
                        holder_kind: EntityKind::Edge,
                        holder_id: edge.id.clone(),
                        field,
                        missing_id: endpoint.clone(),
                    });
                }
            }
        }

        dangling
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutInfo;

    fn sample() -> GraphDocument {
        let mut a = Component::new("A", "Alpha");
        a.layouts
            .insert("default".to_string(), LayoutInfo::at(0.0, 0.0, "componentDetails"));
        let mut g = Group::new("G", "Group", ["A", "Z"]);
        g.layouts
            .insert("team".to_string(), LayoutInfo::at(0.0, 0.0, "group"));
        let mut e = Edge::new("E", "A", "Q");
        e.layouts.insert("flows".to_string(), true);

        GraphDocument {
            components: vec![a],
            groups: vec![g],
            edges: vec![e],
        }
    }

    #[test]
    fn missing_edges_key_defaults_to_empty() {
        let json = r#"{"components":[],"groups":[]}"#;
        let document: GraphDocument = serde_json::from_str(json).expect("parse");
        assert!(document.is_empty());
    }

    #[test]
    fn layout_names_are_sorted_union() {
        assert_eq!(sample().layout_names(), vec!["default", "flows", "team"]);
    }

    #[test]
    fn dangling_references_found() {
        let dangling = sample().dangling_references();

        assert_eq!(
            dangling,
            vec![
                DanglingReference {
                    holder_kind: EntityKind::Group,
                    holder_id: "G".to_string(),
                    field: ReferenceField::Member,
                    missing_id: "Z".to_string(),
                },
                DanglingReference {
                    holder_kind: EntityKind::Edge,
                    holder_id: "E".to_string(),
                    field: ReferenceField::Target,
                    missing_id: "Q".to_string(),
                },
            ]
        );
        assert_eq!(dangling[1].to_string(), "edge E target -> Q (missing)");
    }

    #[test]
    fn edge_may_point_at_group() {
        let mut document = sample();
        document.edges[0].target = "G".to_string();
        document.groups[0].component_ids = vec!["A".to_string()];

        assert!(document.dangling_references().is_empty());
    }

    #[test]
    fn duplicate_ids_across_kinds() {
        let mut document = sample();
        document.edges.push(Edge::new("A", "A", "A"));

        assert_eq!(document.duplicate_ids(), vec!["A".to_string()]);
    }
}
