//! `view [layout]`: project one view for a renderer.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::{GraphStore, LayoutView, MemoryStore, StoreError};

pub(super) fn run(
    store: &mut MemoryStore,
    args: &[String],
    config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let layout = args.first().unwrap_or(&config.default_layout);
    let view = LayoutView::project(&store.get_all(), layout);

    let lines = view
        .nodes
        .iter()
        .map(|node| {
            let marker = if node.positioned { "" } else { " (grid)" };
            format!("{} {} at ({}, {}){}", node.kind, node.id, node.x, node.y, marker)
        })
        .chain(
            view.edges
                .iter()
                .map(|edge| format!("edge {}: {} -> {}", edge.id, edge.source, edge.target)),
        )
        .collect();

    let data =
        serde_json::to_value(&view).map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(ToolReport::new(
        format!(
            "View \"{}\": {} nodes, {} edges",
            layout,
            view.nodes.len(),
            view.edges.len()
        ),
        data,
    )
    .with_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Component, Edge, LayoutInfo};

    #[test]
    fn defaults_to_configured_layout() {
        let mut store = MemoryStore::new();
        store.add_component(&Component::new("A", "a")).expect("add");
        store.add_component(&Component::new("B", "b")).expect("add");
        store
            .add_component_layout("A", "default", &LayoutInfo::at(40.0, 50.0, "componentDetails"))
            .expect("layout");
        store.add_edge(&Edge::new("E", "A", "B")).expect("edge");
        store.add_edge_layout("E", "default", true).expect("edge layout");

        let report = run(&mut store, &[], &DashConfig::default()).expect("run");

        assert_eq!(report.summary, "View \"default\": 2 nodes, 1 edges");
        assert_eq!(
            report.lines,
            vec![
                "component A at (40, 50)",
                "component B at (200, 0) (grid)",
                "edge E: A -> B",
            ]
        );
        assert_eq!(report.data["nodes"][1]["positioned"], false);
    }
}
