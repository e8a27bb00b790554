//! `example-components [count]`: add numbered sample components.
//!
//! Ids run `EXAMPLE-001`, `EXAMPLE-002`, ... so a second run against the
//! same file stops at the first duplicate id.

use super::ToolReport;
use crate::DashError;
use crate::config::DashConfig;
use archgraph_core::{CmdbFacts, Component, Facts, GraphStore, LayoutInfo, MemoryStore, Solution};

/// Sample components sit on a tighter grid than `add-layout`.
const EXAMPLE_GRID_SPACING: f64 = 100.0;

/// Largest count accepted in one run. The id scheme stays readable well past it.
pub const MAX_EXAMPLE_COUNT: usize = 10_000;

fn example_component(index: usize, config: &DashConfig) -> Component {
    let number = index + 1;
    let id = format!("EXAMPLE-{:03}", number);
    let label = format!("Example Component {}", number);

    let mut component = Component::new(id.clone(), label.clone());
    component.description = "This is an example component for testing purposes".to_string();
    component.facts = Facts {
        business_capabilities: Some(vec!["example-capability".to_string()]),
        cmdb_facts: Some(CmdbFacts {
            id,
            name: label,
            description: "Example component".to_string(),
            aliases: Some(Vec::new()),
            solution: Solution {
                id: "SOL-EXAMPLE".to_string(),
                name: "Example Solution".to_string(),
                link: "https://example.com/solution".to_string(),
            },
            ..CmdbFacts::default()
        }),
        ..Facts::default()
    };

    let (x, y) = config.grid_position(index, EXAMPLE_GRID_SPACING);
    component.layouts.insert(
        config.default_layout.clone(),
        LayoutInfo::at(x, y, config.node_type.as_str()),
    );
    component
}

fn parse_count(args: &[String], config: &DashConfig) -> Result<usize, DashError> {
    let Some(raw) = args.first() else {
        return Ok(config.example_count);
    };
    match raw.parse::<usize>() {
        Ok(count) if count > MAX_EXAMPLE_COUNT => Err(DashError::Usage(format!(
            "Component count {} exceeds maximum {}",
            count, MAX_EXAMPLE_COUNT
        ))),
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(DashError::Usage(
            "Component count must be a positive number".to_string(),
        )),
    }
}

pub(super) fn run(
    store: &mut MemoryStore,
    args: &[String],
    config: &DashConfig,
) -> Result<ToolReport, DashError> {
    let count = parse_count(args, config)?;
    tracing::info!("Generating {} example components", count);

    let mut ids = Vec::new();
    for index in 0..count {
        let added = store.add_component(&example_component(index, config))?;
        ids.push(added.id);
    }

    Ok(ToolReport::new(
        format!("Generated {} example components", ids.len()),
        serde_json::json!({ "added": ids }),
    ))
}
