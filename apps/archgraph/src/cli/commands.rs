//! # Document File I/O
//!
//! Reading and writing Graph Document files. The only place the CLI
//! touches the filesystem for graph data.

use crate::DashError;
use archgraph_core::primitives::MAX_DOCUMENT_SIZE;
use archgraph_core::{GraphDocument, GraphStore, MemoryStore, document_from_json, document_to_json};
use std::path::Path;

/// Load the document at `path`, or an empty one when no path is given.
///
/// A path that does not exist is an error, not an empty graph.
pub async fn load_document(path: Option<&Path>) -> Result<GraphDocument, DashError> {
    let Some(path) = path else {
        tracing::info!("Starting with empty dataset");
        return Ok(GraphDocument::empty());
    };

    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| DashError::io(path, e))?;
    if !exists {
        return Err(DashError::DataNotFound(path.to_path_buf()));
    }

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| DashError::io(path, e))?;
    if metadata.len() > MAX_DOCUMENT_SIZE as u64 {
        return Err(DashError::Usage(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DOCUMENT_SIZE
        )));
    }

    tracing::info!("Reading data from: {}", path.display());
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DashError::io(path, e))?;
    let document = document_from_json(&bytes)?;
    tracing::debug!(
        "Loaded {} components, {} groups, {} edges",
        document.components.len(),
        document.groups.len(),
        document.edges.len()
    );
    Ok(document)
}

/// Write the store's full document to `path` as pretty JSON.
pub async fn save_document(path: &Path, store: &MemoryStore) -> Result<(), DashError> {
    let bytes = document_to_json(&store.get_all())?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| DashError::io(path, e))?;
    tracing::info!("Successfully wrote data to: {}", path.display());
    Ok(())
}
