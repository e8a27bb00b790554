//! # Property-Based Tests
//!
//! Identifier uniqueness and copy isolation over random operation sequences.

use archgraph_core::{Component, Edge, GraphStore, Group, MemoryStore, StoreError};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// One add call: entity kind and an explicit id, or `None` for a generated one.
fn add_op() -> impl Strategy<Value = (u8, Option<String>)> {
    (0u8..3, proptest::option::of("[A-F]{1,2}"))
}

fn apply(store: &mut MemoryStore, kind: u8, id: &str) -> Result<String, StoreError> {
    match kind {
        0 => store.add_component(&Component::new(id, "c")).map(|c| c.id),
        1 => store
            .add_group(&Group::new(id, "g", Vec::<String>::new()))
            .map(|g| g.id),
        _ => store.add_edge(&Edge::new(id, "A", "B")).map(|e| e.id),
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// No two entities of any kind ever share an id.
    #[test]
    fn ids_unique_across_kinds(ops in vec(add_op(), 1..60)) {
        let mut store = MemoryStore::new();
        let mut seen = BTreeSet::new();

        for (kind, id) in &ops {
            let requested = id.clone().unwrap_or_default();
            match apply(&mut store, *kind, &requested) {
                Ok(assigned) => {
                    prop_assert!(seen.insert(assigned.clone()), "id {} reused", assigned);
                    if !requested.is_empty() {
                        prop_assert_eq!(assigned, requested);
                    }
                }
                Err(StoreError::DuplicateId(dup)) => {
                    prop_assert!(seen.contains(&dup));
                }
                Err(other) => {
                    return Err(TestCaseError::fail(format!("unexpected error: {}", other)));
                }
            }
        }

        let all = store.get_all();
        prop_assert_eq!(all.ids().count(), seen.len());
        prop_assert!(all.duplicate_ids().is_empty());
    }

    /// Mutating anything handed out never changes the store.
    #[test]
    fn handed_out_values_are_isolated(labels in vec("[a-z]{1,8}", 1..20)) {
        let mut store = MemoryStore::new();
        for label in &labels {
            store.add_component(&Component::new("", label.as_str())).expect("add");
        }
        let before = store.get_all();

        let mut snapshot = store.get_all();
        for component in &mut snapshot.components {
            component.label.push('!');
            component.facts.business_capabilities = Some(vec![String::new()]);
        }
        snapshot.groups.push(Group::new("X", "x", ["Y"]));
        if let Some(first) = before.components.first() {
            let mut found = store.find_component(&first.id).expect("find");
            found.description = "changed".to_string();
        }

        prop_assert_eq!(store.get_all(), before);
    }

    /// Deleting frees exactly the deleted id.
    #[test]
    fn delete_frees_id(count in 1usize..20, victim in 0usize..20) {
        let mut store = MemoryStore::new();
        let ids: Vec<String> = (0..count)
            .map(|_| store.add_component(&Component::new("", "c")).expect("add").id)
            .collect();
        let victim = &ids[victim % count];

        store.delete_component(victim).expect("delete");

        prop_assert!(!store.contains_id(victim));
        prop_assert_eq!(store.component_count(), count - 1);
        for id in ids.iter().filter(|id| *id != victim) {
            prop_assert!(store.contains_id(id));
        }
    }
}
