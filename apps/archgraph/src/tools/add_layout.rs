//! `add-layout <name>`: position every component on a grid in a new view.
//!
//! An existing entry with the same name is replaced, size and background
//! included. Components sharing an id are placed once, through the first
//! holder; the rest are skipped with a warning.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::{GraphStore, LayoutInfo, MemoryStore};
use std::collections::BTreeSet;

pub(super) fn run(
    store: &mut MemoryStore,
    args: &[String],
    config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let Some(name) = args.first() else {
        return Err(DashError::Usage(
            "Layout name is required as first argument".to_string(),
        ));
    };
    tracing::info!("Adding layout: {}", name);

    let mut seen = BTreeSet::new();
    let mut ids: Vec<String> = Vec::new();
    for component in store.get_all().components {
        if seen.insert(component.id.clone()) {
            ids.push(component.id);
        } else {
            tracing::warn!("Skipping duplicate component id {} in layout \"{}\"", component.id, name);
        }
    }
    let skipped = store.component_count() - ids.len();
    let mut replaced = 0usize;

    for (index, id) in ids.iter().enumerate() {
        if store.get_component_layout(id, name)?.is_some() {
            store.remove_component_layout(id, name)?;
            replaced += 1;
        }
        let (x, y) = config.grid_position(index, config.grid_spacing);
        store.add_component_layout(id, name, &LayoutInfo::at(x, y, config.node_type.as_str()))?;
    }

    if replaced > 0 {
        tracing::warn!("Replaced existing \"{}\" layout on {} components", name, replaced);
    }

    Ok(ToolReport::new(
        format!("Added layout \"{}\" to {} components", name, ids.len()),
        serde_json::json!({
            "layout": name,
            "components": ids.len(),
            "replaced": replaced,
            "skipped_duplicates": skipped,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Component, GraphDocument};

    #[test]
    fn places_components_on_grid() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            store
                .add_component(&Component::new(format!("C{:02}", i), "c"))
                .expect("add");
        }

        let report = run(&mut store, &["grid".to_string()], &DashConfig::default()).expect("run");

        assert_eq!(report.data["components"], 12);
        let eleventh = store.get_component_layout("C10", "grid").expect("C10");
        assert_eq!(
            eleventh,
            Some(LayoutInfo::at(0.0, 150.0, "componentDetails"))
        );
        let second = store.get_component_layout("C01", "grid").expect("C01");
        assert_eq!(second.map(|l| (l.x, l.y)), Some((150.0, 0.0)));
    }

    #[test]
    fn existing_entry_is_replaced() {
        let mut store = MemoryStore::new();
        store.add_component(&Component::new("A", "a")).expect("add");
        store
            .add_component_layout(
                "A",
                "grid",
                &LayoutInfo::at(9.0, 9.0, "compact").with_size(10.0, 10.0),
            )
            .expect("layout");

        let report = run(&mut store, &["grid".to_string()], &DashConfig::default()).expect("run");

        assert_eq!(report.data["replaced"], 1);
        assert_eq!(
            store.get_component_layout("A", "grid").expect("A"),
            Some(LayoutInfo::at(0.0, 0.0, "componentDetails"))
        );
    }

    #[test]
    fn duplicate_ids_placed_once() {
        let document = GraphDocument {
            components: vec![
                Component::new("A", "first"),
                Component::new("A", "second"),
                Component::new("B", "b"),
            ],
            ..GraphDocument::default()
        };
        let mut store = MemoryStore::from_document(document);

        let report = run(&mut store, &["grid".to_string()], &DashConfig::default()).expect("run");

        assert_eq!(report.data["components"], 2);
        assert_eq!(report.data["replaced"], 0);
        assert_eq!(report.data["skipped_duplicates"], 1);
        assert_eq!(
            store.get_component_layout("B", "grid").expect("B"),
            Some(LayoutInfo::at(150.0, 0.0, "componentDetails"))
        );
    }

    #[test]
    fn missing_name_is_usage_error() {
        let mut store = MemoryStore::new();
        let result = run(&mut store, &[], &DashConfig::default());
        assert!(matches!(result, Err(DashError::Usage(_))));
    }
}
