//! `layouts`: list every view name used by any entity.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::MemoryStore;

pub(super) fn run(
    store: &mut MemoryStore,
    _args: &[String],
    _config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let names = store.layout_names();
    let lines = names
        .iter()
        .map(|name| {
            if name.is_empty() {
                "(empty name)".to_string()
            } else {
                name.clone()
            }
        })
        .collect();

    Ok(ToolReport::new(
        format!("{} layouts", names.len()),
        serde_json::json!({ "layouts": names }),
    )
    .with_lines(lines))
}
