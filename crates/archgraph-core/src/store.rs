//! # Graph Store
//!
//! The sole mutable owner of the component, group and edge collections.
//!
//! This module defines the `GraphStore` trait and its in-memory
//! implementation, `MemoryStore`.
//!
//! ## Ownership
//!
//! Nothing crosses the store boundary by reference. Entities passed in are
//! cloned into the store, and every value handed back is a clone, so callers
//! may mutate what they receive without touching store state.
//!
//! ## Referential integrity
//!
//! Deletes do not cascade. Removing a component leaves edges and group
//! memberships that name it in place; `dangling_references` reports them.

use crate::document::{DanglingReference, GraphDocument};
use crate::ids::IdIndex;
use crate::layout::LayoutEngine;
use crate::merge::FactMerge;
use crate::primitives::GROUP_NODE_TYPE;
use crate::{
    Component, ComponentUpdate, Edge, EdgeUpdate, Entity, FactKey, Facts, Group, GroupUpdate,
    LayoutInfo, LayoutPatch, Placement, StoreError,
};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The GraphStore trait defines the full CRUD/query contract of the store.
///
/// Lookups return `Option`: absence is a normal result. Every mutation that
/// targets an id fails with `StoreError::NotFound` when no entity of that
/// kind has it.
pub trait GraphStore {
    // --- components -----------------------------------------------------------

    /// Find a component by id.
    fn find_component(&self, id: &str) -> Option<Component>;

    /// Add a component. An empty id is replaced by an allocated one.
    fn add_component(&mut self, component: &Component) -> Result<Component, StoreError>;

    /// Delete a component. Does not touch edges or groups referencing it.
    fn delete_component(&mut self, id: &str) -> Result<(), StoreError>;

    /// Apply the set fields of `update` (label, description).
    fn update_component(
        &mut self,
        id: &str,
        update: &ComponentUpdate,
    ) -> Result<Component, StoreError>;

    /// Overwrite the fact slots set in `facts`.
    fn upsert_component_facts(&mut self, id: &str, facts: &Facts)
    -> Result<Component, StoreError>;

    /// Unset fact slots; absent keys are ignored.
    fn remove_component_facts(
        &mut self,
        id: &str,
        keys: &[FactKey],
    ) -> Result<Component, StoreError>;

    /// Add a layout for one view.
    fn add_component_layout(
        &mut self,
        id: &str,
        layout: &str,
        info: &LayoutInfo,
    ) -> Result<Component, StoreError>;

    /// Patch an existing layout.
    fn update_component_layout(
        &mut self,
        id: &str,
        layout: &str,
        patch: &LayoutPatch,
    ) -> Result<Component, StoreError>;

    /// Remove a layout.
    fn remove_component_layout(&mut self, id: &str, layout: &str)
    -> Result<Component, StoreError>;

    /// The component's layout for one view.
    fn get_component_layout(&self, id: &str, layout: &str)
    -> Result<Option<LayoutInfo>, StoreError>;

    /// Apply a drag/resize in one view, creating the layout if needed.
    fn place_component(
        &mut self,
        id: &str,
        layout: &str,
        placement: &Placement,
    ) -> Result<Component, StoreError>;

    /// Apply several field updates in one call.
    ///
    /// Every update whose id resolves is applied. If any id is missing the
    /// call fails with `StoreError::NotFoundMany` naming all of them; the
    /// applied updates are not undone.
    fn update_components(
        &mut self,
        updates: &[(String, ComponentUpdate)],
    ) -> Result<Vec<Component>, StoreError>;

    /// Apply several drag/resizes in one view, as `update_components` does
    /// for fields.
    fn place_components(
        &mut self,
        layout: &str,
        placements: &[(String, Placement)],
    ) -> Result<Vec<Component>, StoreError>;

    // --- groups ---------------------------------------------------------------

    /// Find a group by id.
    fn find_group(&self, id: &str) -> Option<Group>;

    /// Add a group. An empty id is replaced by an allocated one.
    fn add_group(&mut self, group: &Group) -> Result<Group, StoreError>;

    /// Delete a group.
    fn delete_group(&mut self, id: &str) -> Result<(), StoreError>;

    /// Apply the set fields of `update` (label, description, member list).
    fn update_group(&mut self, id: &str, update: &GroupUpdate) -> Result<Group, StoreError>;

    /// Overwrite the fact slots set in `facts`.
    fn upsert_group_facts(&mut self, id: &str, facts: &Facts) -> Result<Group, StoreError>;

    /// Unset fact slots; absent keys are ignored.
    fn remove_group_facts(&mut self, id: &str, keys: &[FactKey]) -> Result<Group, StoreError>;

    /// Add a layout for one view.
    fn add_group_layout(
        &mut self,
        id: &str,
        layout: &str,
        info: &LayoutInfo,
    ) -> Result<Group, StoreError>;

    /// Patch an existing layout.
    fn update_group_layout(
        &mut self,
        id: &str,
        layout: &str,
        patch: &LayoutPatch,
    ) -> Result<Group, StoreError>;

    /// Remove a layout.
    fn remove_group_layout(&mut self, id: &str, layout: &str) -> Result<Group, StoreError>;

    /// The group's layout for one view.
    fn get_group_layout(&self, id: &str, layout: &str) -> Result<Option<LayoutInfo>, StoreError>;

    /// Apply a drag/resize in one view, creating the layout if needed.
    fn place_group(
        &mut self,
        id: &str,
        layout: &str,
        placement: &Placement,
    ) -> Result<Group, StoreError>;

    /// Apply several drag/resizes in one view; missing ids are collected
    /// into one `StoreError::NotFoundMany`.
    fn place_groups(
        &mut self,
        layout: &str,
        placements: &[(String, Placement)],
    ) -> Result<Vec<Group>, StoreError>;

    // --- edges ----------------------------------------------------------------

    /// Find an edge by id.
    fn find_edge(&self, id: &str) -> Option<Edge>;

    /// Add an edge. An empty id is replaced by an allocated one.
    fn add_edge(&mut self, edge: &Edge) -> Result<Edge, StoreError>;

    /// Delete an edge.
    fn delete_edge(&mut self, id: &str) -> Result<(), StoreError>;

    /// Apply the set fields of `update` (source, target, label, description).
    fn update_edge(&mut self, id: &str, update: &EdgeUpdate) -> Result<Edge, StoreError>;

    /// Overwrite the fact slots set in `facts`.
    fn upsert_edge_facts(&mut self, id: &str, facts: &Facts) -> Result<Edge, StoreError>;

    /// Unset fact slots; absent keys are ignored.
    fn remove_edge_facts(&mut self, id: &str, keys: &[FactKey]) -> Result<Edge, StoreError>;

    /// Record the edge's visibility in a new view.
    fn add_edge_layout(&mut self, id: &str, layout: &str, visible: bool)
    -> Result<Edge, StoreError>;

    /// Change the edge's visibility in an existing view.
    fn update_edge_layout(
        &mut self,
        id: &str,
        layout: &str,
        visible: bool,
    ) -> Result<Edge, StoreError>;

    /// Remove the edge's entry for a view.
    fn remove_edge_layout(&mut self, id: &str, layout: &str) -> Result<Edge, StoreError>;

    /// The edge's visibility in a view.
    fn get_edge_layout(&self, id: &str, layout: &str) -> Result<Option<bool>, StoreError>;

    // --- whole store ----------------------------------------------------------

    /// Empty all three collections.
    fn clear_store(&mut self);

    /// Deep copy of the full document.
    fn get_all(&self) -> GraphDocument;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory `GraphStore`.
///
/// Collections are kept as ordered vectors so `get_all` reproduces document
/// order: loaded entities first, then additions in call order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    components: Vec<Component>,
    groups: Vec<Group>,
    edges: Vec<Edge>,
    ids: IdIndex,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a private copy of `document`.
    #[must_use]
    pub fn with_document(document: &GraphDocument) -> Self {
        Self::from_document(document.clone())
    }

    /// Create a store taking ownership of `document`.
    ///
    /// The document is used as-is: duplicate ids are tracked, not rejected.
    #[must_use]
    pub fn from_document(document: GraphDocument) -> Self {
        let mut ids = IdIndex::new();
        for id in document.ids() {
            ids.track(id);
        }
        Self {
            components: document.components,
            groups: document.groups,
            edges: document.edges,
            ids,
        }
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check whether any entity of any kind holds `id`.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Sorted names of every view used by any entity.
    #[must_use]
    pub fn layout_names(&self) -> Vec<String> {
        GraphDocument::collect_layout_names(&self.components, &self.groups, &self.edges)
    }

    /// Edges and group memberships naming ids that no longer exist.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        GraphDocument::collect_dangling(&self.components, &self.groups, &self.edges)
    }

    /// Store a copy of `entity` in `items`, allocating or claiming its id.
    fn insert<E: Entity>(
        ids: &mut IdIndex,
        items: &mut Vec<E>,
        entity: &E,
    ) -> Result<E, StoreError> {
        let mut stored = entity.clone();
        if stored.id().is_empty() {
            stored.set_id(ids.allocate()?);
        }
        ids.claim(stored.id())?;
        items.push(stored.clone());
        Ok(stored)
    }

    /// Remove the first entity with `id` from `items`.
    fn remove<E: Entity>(ids: &mut IdIndex, items: &mut Vec<E>, id: &str) -> Result<(), StoreError> {
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;
        items.remove(index);
        ids.release(id);
        Ok(())
    }

    /// Resolve `id`, apply `mutate`, return a copy of the result.
    ///
    /// `mutate` runs on the stored entity; if it fails the entity is left as
    /// the failing step found it (layout and fact operations fail before
    /// writing anything).
    fn modify<E: Entity>(
        items: &mut [E],
        id: &str,
        mutate: impl FnOnce(&mut E) -> Result<(), StoreError>,
    ) -> Result<E, StoreError> {
        let entity = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;
        mutate(entity)?;
        Ok(entity.clone())
    }

    /// Apply `mutate` to every entry whose id resolves.
    ///
    /// Missing ids do not stop the batch; they are reported together once
    /// every entry has been tried.
    fn modify_each<E: Entity, T>(
        items: &mut [E],
        entries: &[(String, T)],
        mut mutate: impl FnMut(&mut E, &T),
    ) -> Result<Vec<E>, StoreError> {
        let mut updated = Vec::new();
        let mut missing = Vec::new();

        for (id, change) in entries {
            match items.iter_mut().find(|item| item.id() == id) {
                Some(entity) => {
                    mutate(entity, change);
                    updated.push(entity.clone());
                }
                None => missing.push(id.clone()),
            }
        }

        if missing.is_empty() {
            Ok(updated)
        } else {
            Err(StoreError::NotFoundMany {
                kind: E::KIND,
                ids: missing,
            })
        }
    }

    /// Resolve `id` read-only.
    fn resolve<'a, E: Entity>(items: &'a [E], id: &str) -> Result<&'a E, StoreError> {
        items
            .iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))
    }

    fn lookup<E: Entity>(items: &[E], id: &str) -> Option<E> {
        items.iter().find(|item| item.id() == id).cloned()
    }
}

impl From<GraphDocument> for MemoryStore {
    fn from(document: GraphDocument) -> Self {
        Self::from_document(document)
    }
}

impl GraphStore for MemoryStore {
    // --- components -----------------------------------------------------------

    fn find_component(&self, id: &str) -> Option<Component> {
        Self::lookup(&self.components, id)
    }

    fn add_component(&mut self, component: &Component) -> Result<Component, StoreError> {
        Self::insert(&mut self.ids, &mut self.components, component)
    }

    fn delete_component(&mut self, id: &str) -> Result<(), StoreError> {
        Self::remove(&mut self.ids, &mut self.components, id)
    }

    fn update_component(
        &mut self,
        id: &str,
        update: &ComponentUpdate,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            update.apply(component);
            Ok(())
        })
    }

    fn upsert_component_facts(
        &mut self,
        id: &str,
        facts: &Facts,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            FactMerge::upsert_entity(component, facts);
            Ok(())
        })
    }

    fn remove_component_facts(
        &mut self,
        id: &str,
        keys: &[FactKey],
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            FactMerge::remove_entity(component, keys);
            Ok(())
        })
    }

    fn add_component_layout(
        &mut self,
        id: &str,
        layout: &str,
        info: &LayoutInfo,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            LayoutEngine::add(component, layout, info)
        })
    }

    fn update_component_layout(
        &mut self,
        id: &str,
        layout: &str,
        patch: &LayoutPatch,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            LayoutEngine::update(component, layout, patch)
        })
    }

    fn remove_component_layout(
        &mut self,
        id: &str,
        layout: &str,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            LayoutEngine::remove(component, layout)
        })
    }

    fn get_component_layout(
        &self,
        id: &str,
        layout: &str,
    ) -> Result<Option<LayoutInfo>, StoreError> {
        Self::resolve(&self.components, id).map(|component| LayoutEngine::get(component, layout))
    }

    fn place_component(
        &mut self,
        id: &str,
        layout: &str,
        placement: &Placement,
    ) -> Result<Component, StoreError> {
        Self::modify(&mut self.components, id, |component| {
            LayoutEngine::place_default(component, layout, placement);
            Ok(())
        })
    }

    fn update_components(
        &mut self,
        updates: &[(String, ComponentUpdate)],
    ) -> Result<Vec<Component>, StoreError> {
        Self::modify_each(&mut self.components, updates, |component, update| {
            update.apply(component);
        })
    }

    fn place_components(
        &mut self,
        layout: &str,
        placements: &[(String, Placement)],
    ) -> Result<Vec<Component>, StoreError> {
        Self::modify_each(&mut self.components, placements, |component, placement| {
            LayoutEngine::place_default(component, layout, placement);
        })
    }

    // --- groups ---------------------------------------------------------------

    fn find_group(&self, id: &str) -> Option<Group> {
        Self::lookup(&self.groups, id)
    }

    fn add_group(&mut self, group: &Group) -> Result<Group, StoreError> {
        Self::insert(&mut self.ids, &mut self.groups, group)
    }

    fn delete_group(&mut self, id: &str) -> Result<(), StoreError> {
        Self::remove(&mut self.ids, &mut self.groups, id)
    }

    fn update_group(&mut self, id: &str, update: &GroupUpdate) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            update.apply(group);
            Ok(())
        })
    }

    fn upsert_group_facts(&mut self, id: &str, facts: &Facts) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            FactMerge::upsert_entity(group, facts);
            Ok(())
        })
    }

    fn remove_group_facts(&mut self, id: &str, keys: &[FactKey]) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            FactMerge::remove_entity(group, keys);
            Ok(())
        })
    }

    fn add_group_layout(
        &mut self,
        id: &str,
        layout: &str,
        info: &LayoutInfo,
    ) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            LayoutEngine::add(group, layout, info)
        })
    }

    fn update_group_layout(
        &mut self,
        id: &str,
        layout: &str,
        patch: &LayoutPatch,
    ) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            LayoutEngine::update(group, layout, patch)
        })
    }

    fn remove_group_layout(&mut self, id: &str, layout: &str) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            LayoutEngine::remove(group, layout)
        })
    }

    fn get_group_layout(&self, id: &str, layout: &str) -> Result<Option<LayoutInfo>, StoreError> {
        Self::resolve(&self.groups, id).map(|group| LayoutEngine::get(group, layout))
    }

    fn place_group(
        &mut self,
        id: &str,
        layout: &str,
        placement: &Placement,
    ) -> Result<Group, StoreError> {
        Self::modify(&mut self.groups, id, |group| {
            LayoutEngine::place(group, layout, placement, GROUP_NODE_TYPE);
            Ok(())
        })
    }

    fn place_groups(
        &mut self,
        layout: &str,
        placements: &[(String, Placement)],
    ) -> Result<Vec<Group>, StoreError> {
        Self::modify_each(&mut self.groups, placements, |group, placement| {
            LayoutEngine::place(group, layout, placement, GROUP_NODE_TYPE);
        })
    }

    // --- edges ----------------------------------------------------------------

    fn find_edge(&self, id: &str) -> Option<Edge> {
        Self::lookup(&self.edges, id)
    }

    fn add_edge(&mut self, edge: &Edge) -> Result<Edge, StoreError> {
        Self::insert(&mut self.ids, &mut self.edges, edge)
    }

    fn delete_edge(&mut self, id: &str) -> Result<(), StoreError> {
        Self::remove(&mut self.ids, &mut self.edges, id)
    }

    fn update_edge(&mut self, id: &str, update: &EdgeUpdate) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            update.apply(edge);
            Ok(())
        })
    }

    fn upsert_edge_facts(&mut self, id: &str, facts: &Facts) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            FactMerge::upsert_entity(edge, facts);
            Ok(())
        })
    }

    fn remove_edge_facts(&mut self, id: &str, keys: &[FactKey]) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            FactMerge::remove_entity(edge, keys);
            Ok(())
        })
    }

    fn add_edge_layout(
        &mut self,
        id: &str,
        layout: &str,
        visible: bool,
    ) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            LayoutEngine::add_edge(edge, layout, visible)
        })
    }

    fn update_edge_layout(
        &mut self,
        id: &str,
        layout: &str,
        visible: bool,
    ) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            LayoutEngine::update_edge(edge, layout, visible)
        })
    }

    fn remove_edge_layout(&mut self, id: &str, layout: &str) -> Result<Edge, StoreError> {
        Self::modify(&mut self.edges, id, |edge| {
            LayoutEngine::remove_edge(edge, layout)
        })
    }

    fn get_edge_layout(&self, id: &str, layout: &str) -> Result<Option<bool>, StoreError> {
        Self::resolve(&self.edges, id).map(|edge| LayoutEngine::get_edge(edge, layout))
    }

    // --- whole store ----------------------------------------------------------

    fn clear_store(&mut self) {
        self.components.clear();
        self.groups.clear();
        self.edges.clear();
        self.ids.clear();
    }

    fn get_all(&self) -> GraphDocument {
        GraphDocument {
            components: self.components.clone(),
            groups: self.groups.clone(),
            edges: self.edges.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
