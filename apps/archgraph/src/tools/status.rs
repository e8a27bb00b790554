//! `status`: entity counts and id health.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::{GraphStore, MemoryStore};

pub(super) fn run(
    store: &mut MemoryStore,
    _args: &[String],
    _config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let document = store.get_all();
    let duplicates = document.duplicate_ids();
    let dangling = store.dangling_references().len();
    let layouts = store.layout_names().len();

    let lines = vec![
        format!("Components: {}", store.component_count()),
        format!("Groups:     {}", store.group_count()),
        format!("Edges:      {}", store.edge_count()),
        format!("Layouts:    {}", layouts),
        format!("Duplicates: {}", duplicates.len()),
        format!("Dangling:   {}", dangling),
    ];

    Ok(ToolReport::new(
        "Graph Status",
        serde_json::json!({
            "components": store.component_count(),
            "groups": store.group_count(),
            "edges": store.edge_count(),
            "layouts": layouts,
            "duplicate_ids": duplicates,
            "dangling_references": dangling,
        }),
    )
    .with_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Component, Edge, GraphDocument};

    #[test]
    fn counts_and_duplicates() {
        let document = GraphDocument {
            components: vec![Component::new("A", "a"), Component::new("A", "b")],
            groups: Vec::new(),
            edges: vec![Edge::new("E", "A", "Z")],
        };
        let mut store = MemoryStore::from_document(document);

        let report = run(&mut store, &[], &DashConfig::default()).expect("run");

        assert_eq!(report.data["components"], 2);
        assert_eq!(report.data["edges"], 1);
        assert_eq!(report.data["duplicate_ids"], serde_json::json!(["A"]));
        assert_eq!(report.data["dangling_references"], 1);
    }
}
