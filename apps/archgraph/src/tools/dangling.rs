//! `dangling`: report edges and group members naming missing entities.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::MemoryStore;

pub(super) fn run(
    store: &mut MemoryStore,
    _args: &[String],
    _config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let dangling = store.dangling_references();
    for reference in &dangling {
        tracing::warn!("Dangling reference: {}", reference);
    }

    let data = serde_json::to_value(&dangling)
        .map_err(|e| archgraph_core::StoreError::Serialization(e.to_string()))?;
    let lines = dangling.iter().map(ToString::to_string).collect();

    Ok(ToolReport::new(format!("{} dangling references", dangling.len()), data).with_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Component, GraphStore, Group};

    #[test]
    fn reports_removed_member() {
        let mut store = MemoryStore::new();
        store.add_component(&Component::new("A", "a")).expect("add");
        store
            .add_group(&Group::new("G", "g", ["A", "B"]))
            .expect("group");

        let report = run(&mut store, &[], &DashConfig::default()).expect("run");

        assert_eq!(report.lines, vec!["group G member -> B (missing)"]);
        assert_eq!(report.data[0]["missingId"], "B");
    }
}
