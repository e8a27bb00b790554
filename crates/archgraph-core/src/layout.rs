//! # Layout Subsystem
//!
//! CRUD on one named view of one entity.
//!
//! Components and groups carry a structured `LayoutInfo` per view; edges carry
//! a visibility flag per view. The two are kept apart on purpose: an edge
//! layout is never a position.
//!
//! Layout names are free-form. The empty string is a legal name, and
//! `"default"` has no special meaning here.

use crate::primitives::DEFAULT_NODE_TYPE;
use crate::{Edge, Entity, LayoutInfo, LayoutPatch, Placed, Placement, StoreError};

/// Stateless layout operations.
pub struct LayoutEngine;

impl LayoutEngine {
    fn already_exists<E: Entity>(entity: &E, name: &str) -> StoreError {
        StoreError::LayoutAlreadyExists {
            kind: E::KIND,
            id: entity.id().to_string(),
            layout: name.to_string(),
        }
    }

    fn not_found<E: Entity>(entity: &E, name: &str) -> StoreError {
        StoreError::LayoutNotFound {
            kind: E::KIND,
            id: entity.id().to_string(),
            layout: name.to_string(),
        }
    }

    // =========================================================================
    // NODE LAYOUTS
    // =========================================================================

    /// Insert a copy of `info` under `name`.
    pub fn add<E: Placed>(entity: &mut E, name: &str, info: &LayoutInfo) -> Result<(), StoreError> {
        if entity.layouts().contains_key(name) {
            return Err(Self::already_exists(entity, name));
        }
        entity.layouts_mut().insert(name.to_string(), info.clone());
        Ok(())
    }

    /// Shallow-merge the fields set in `patch` over the existing layout.
    pub fn update<E: Placed>(
        entity: &mut E,
        name: &str,
        patch: &LayoutPatch,
    ) -> Result<(), StoreError> {
        let Some(layout) = entity.layouts_mut().get_mut(name) else {
            return Err(Self::not_found(entity, name));
        };

        if let Some(x) = patch.x {
            layout.x = x;
        }
        if let Some(y) = patch.y {
            layout.y = y;
        }
        if let Some(width) = patch.width {
            layout.width = Some(width);
        }
        if let Some(height) = patch.height {
            layout.height = Some(height);
        }
        if let Some(node_type) = &patch.node_type {
            layout.node_type.clone_from(node_type);
        }
        if let Some(color) = &patch.background_color {
            layout.background_color = Some(color.clone());
        }
        Ok(())
    }

    /// Delete the layout `name`.
    pub fn remove<E: Placed>(entity: &mut E, name: &str) -> Result<(), StoreError> {
        match entity.layouts_mut().remove(name) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(entity, name)),
        }
    }

    /// Copy of the layout `name`, if the entity is positioned in that view.
    #[must_use]
    pub fn get<E: Placed>(entity: &E, name: &str) -> Option<LayoutInfo> {
        entity.layouts().get(name).cloned()
    }

    /// Apply a drag and/or resize in view `name`.
    ///
    /// Creates the layout when the entity is not yet positioned in that view
    /// (origin, `default_node_type`); otherwise keeps its node type.
    pub fn place<E: Placed>(
        entity: &mut E,
        name: &str,
        placement: &Placement,
        default_node_type: &str,
    ) {
        let layout = entity
            .layouts_mut()
            .entry(name.to_string())
            .or_insert_with(|| LayoutInfo::at(0.0, 0.0, default_node_type));

        if let Some(position) = placement.position {
            layout.x = position.x;
            layout.y = position.y;
        }
        if let Some(size) = placement.size {
            layout.width = Some(size.width);
            layout.height = Some(size.height);
        }
    }

    /// [`place`](Self::place) with the component node type as fallback.
    pub fn place_default<E: Placed>(entity: &mut E, name: &str, placement: &Placement) {
        Self::place(entity, name, placement, DEFAULT_NODE_TYPE);
    }

    // =========================================================================
    // EDGE VISIBILITY
    // =========================================================================

    /// Record the edge's visibility in view `name`.
    ///
    /// An existing entry blocks the add whatever its value, `false` included.
    pub fn add_edge(edge: &mut Edge, name: &str, visible: bool) -> Result<(), StoreError> {
        if edge.layouts.contains_key(name) {
            return Err(Self::already_exists(edge, name));
        }
        edge.layouts.insert(name.to_string(), visible);
        Ok(())
    }

    /// Change the edge's visibility in an existing view entry.
    pub fn update_edge(edge: &mut Edge, name: &str, visible: bool) -> Result<(), StoreError> {
        let Some(flag) = edge.layouts.get_mut(name) else {
            return Err(Self::not_found(edge, name));
        };
        *flag = visible;
        Ok(())
    }

    /// Delete the edge's entry for view `name`.
    pub fn remove_edge(edge: &mut Edge, name: &str) -> Result<(), StoreError> {
        match edge.layouts.remove(name) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(edge, name)),
        }
    }

    /// Visibility in view `name`, if recorded.
    #[must_use]
    pub fn get_edge(edge: &Edge, name: &str) -> Option<bool> {
        edge.layouts.get(name).copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, EntityKind, Group};

    #[test]
    fn add_then_get_per_view() {
        let mut component = Component::new("A", "Alpha");
        let l1 = LayoutInfo::at(1.0, 2.0, "componentDetails");
        let l2 = LayoutInfo::at(30.0, 40.0, "compact");

        LayoutEngine::add(&mut component, "default", &l1).expect("add default");
        LayoutEngine::add(&mut component, "team", &l2).expect("add team");

        assert_eq!(LayoutEngine::get(&component, "default"), Some(l1));
        assert_eq!(LayoutEngine::get(&component, "team"), Some(l2));
        assert_eq!(LayoutEngine::get(&component, "other"), None);
    }

    #[test]
    fn add_twice_fails() {
        let mut group = Group::new("G", "Group", Vec::<String>::new());
        let layout = LayoutInfo::at(0.0, 0.0, "group");

        LayoutEngine::add(&mut group, "default", &layout).expect("first add");
        let err = LayoutEngine::add(&mut group, "default", &layout).expect_err("second add");

        assert_eq!(
            err,
            StoreError::LayoutAlreadyExists {
                kind: EntityKind::Group,
                id: "G".to_string(),
                layout: "default".to_string(),
            }
        );
    }

    #[test]
    fn update_merges_only_set_fields() {
        let mut component = Component::new("A", "Alpha");
        let layout = LayoutInfo::at(1.0, 2.0, "componentDetails").with_background("#fff");
        LayoutEngine::add(&mut component, "default", &layout).expect("add");

        let patch = LayoutPatch {
            x: Some(50.0),
            width: Some(300.0),
            ..LayoutPatch::default()
        };
        LayoutEngine::update(&mut component, "default", &patch).expect("update");

        let updated = LayoutEngine::get(&component, "default").expect("layout");
        assert_eq!(updated.x, 50.0);
        assert_eq!(updated.y, 2.0);
        assert_eq!(updated.width, Some(300.0));
        assert_eq!(updated.height, None);
        assert_eq!(updated.background_color.as_deref(), Some("#fff"));
    }

    #[test]
    fn update_and_remove_missing_layout_fail() {
        let mut component = Component::new("A", "Alpha");

        let update = LayoutEngine::update(&mut component, "nope", &LayoutPatch::default());
        assert!(matches!(update, Err(StoreError::LayoutNotFound { .. })));

        let remove = LayoutEngine::remove(&mut component, "nope");
        assert!(matches!(remove, Err(StoreError::LayoutNotFound { .. })));
    }

    #[test]
    fn empty_layout_name_is_legal() {
        let mut component = Component::new("A", "Alpha");
        let layout = LayoutInfo::at(0.0, 0.0, "componentDetails");

        LayoutEngine::add(&mut component, "", &layout).expect("add");
        assert_eq!(LayoutEngine::get(&component, ""), Some(layout));
        LayoutEngine::remove(&mut component, "").expect("remove");
        assert!(component.layouts.is_empty());
    }

    #[test]
    fn place_creates_then_moves() {
        let mut component = Component::new("A", "Alpha");

        LayoutEngine::place_default(&mut component, "default", &Placement::resized_to(120.0, 60.0));
        let created = LayoutEngine::get(&component, "default").expect("layout");
        assert_eq!((created.x, created.y), (0.0, 0.0));
        assert_eq!(created.width, Some(120.0));
        assert_eq!(created.node_type, DEFAULT_NODE_TYPE);

        LayoutEngine::place(&mut component, "default", &Placement::moved_to(5.0, 6.0), "other");
        let moved = LayoutEngine::get(&component, "default").expect("layout");
        assert_eq!((moved.x, moved.y), (5.0, 6.0));
        assert_eq!(moved.width, Some(120.0));
        assert_eq!(moved.node_type, DEFAULT_NODE_TYPE);
    }

    #[test]
    fn edge_false_visibility_still_counts_as_existing() {
        let mut edge = Edge::new("E", "A", "B");

        LayoutEngine::add_edge(&mut edge, "team", false).expect("add");
        assert_eq!(LayoutEngine::get_edge(&edge, "team"), Some(false));

        let again = LayoutEngine::add_edge(&mut edge, "team", true);
        assert!(matches!(again, Err(StoreError::LayoutAlreadyExists { .. })));

        LayoutEngine::update_edge(&mut edge, "team", true).expect("update");
        assert_eq!(LayoutEngine::get_edge(&edge, "team"), Some(true));

        LayoutEngine::remove_edge(&mut edge, "team").expect("remove");
        assert_eq!(LayoutEngine::get_edge(&edge, "team"), None);
        assert!(LayoutEngine::remove_edge(&mut edge, "team").is_err());
    }
}
