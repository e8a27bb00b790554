//! # JSON Format
//!
//! The Graph Document as pretty-printed JSON, 2-space indent, no envelope.
//!
//! This is a pure transformation - no file I/O. The size limit is checked
//! before any parsing so an oversized file is rejected without allocating
//! its object tree.

use crate::primitives::MAX_DOCUMENT_SIZE;
use crate::{GraphDocument, StoreError};

/// Serialize a document to pretty JSON bytes.
pub fn document_to_json(document: &GraphDocument) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse a document from JSON bytes.
///
/// Only the JSON shape is checked; duplicate ids and dangling references
/// are accepted as-is.
pub fn document_from_json(bytes: &[u8]) -> Result<GraphDocument, StoreError> {
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(StoreError::Serialization(format!(
            "Document size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_DOCUMENT_SIZE
        )));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| StoreError::Serialization(format!("Failed to parse graph document: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, Edge, Facts, Group, LayoutInfo, Team};

    #[test]
    fn save_load_save_is_stable() {
        let mut component = Component::new("A", "Alpha");
        component.facts = Facts {
            team: Some(Team {
                team_name: "Core".to_string(),
                ..Team::default()
            }),
            ..Facts::default()
        };
        component.layouts.insert(
            "default".to_string(),
            LayoutInfo::at(10.0, 20.0, "componentDetails").with_size(100.0, 50.0),
        );
        let mut edge = Edge::new("E", "A", "G");
        edge.layouts.insert("default".to_string(), true);

        let document = GraphDocument {
            components: vec![component],
            groups: vec![Group::new("G", "Group", ["A"])],
            edges: vec![edge],
        };

        let first = document_to_json(&document).expect("serialize");
        let restored = document_from_json(&first).expect("parse");
        let second = document_to_json(&restored).expect("serialize again");

        assert_eq!(restored, document);
        assert_eq!(first, second);
    }

    #[test]
    fn output_has_no_envelope() {
        let bytes = document_to_json(&GraphDocument::empty()).expect("serialize");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

        assert_eq!(
            value,
            serde_json::json!({"components": [], "groups": [], "edges": []})
        );
    }

    #[test]
    fn off_shape_facts_load_verbatim() {
        let json = br#"{
            "components": [{
                "id": "A", "label": "Alpha", "description": "",
                "facts": {
                    "platforms": [{"type": "aws", "comment": ""}],
                    "apiSpecifications": [{"apiType": "AsyncAPI", "apiSpace": "events"}],
                    "qualityMetrics": "unknown"
                },
                "layouts": {}
            }],
            "groups": [],
            "edges": []
        }"#;

        let document = document_from_json(json).expect("parse");
        let bytes = document_to_json(&document).expect("serialize");
        let reloaded = document_from_json(&bytes).expect("parse again");
        assert_eq!(reloaded, document);

        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let facts = &value["components"][0]["facts"];
        assert_eq!(facts["platforms"][0]["type"], "aws");
        assert_eq!(facts["apiSpecifications"][0]["apiType"], "AsyncAPI");
        assert_eq!(facts["qualityMetrics"], "unknown");
    }

    #[test]
    fn malformed_json_rejected() {
        let result = document_from_json(b"{\"components\": 5}");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
