//! Persisted condition stash.
//!
//! When condition flattening and where-clause construction run as separate
//! passes, the flattened conditions travel through a JSON side-channel file.
//! Serialization is field-order stable, so the same input always produces
//! the same bytes as the in-process stash content.

use std::fs;
use std::path::Path;

use tracing::debug;

use define_model::StashedCondition;

use crate::error::{BuildError, Result};

/// Write the flattened condition stash to `path`.
pub fn write_stash(path: &Path, conditions: &[StashedCondition]) -> Result<()> {
    let json = serde_json::to_string_pretty(conditions).map_err(|source| {
        BuildError::StashFormat {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, json).map_err(|source| BuildError::StashIo {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = conditions.len(), "wrote condition stash");
    Ok(())
}

/// Read a condition stash previously produced by [`write_stash`].
pub fn read_stash(path: &Path) -> Result<Vec<StashedCondition>> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::StashIo {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let conditions: Vec<StashedCondition> =
        serde_json::from_str(&text).map_err(|source| BuildError::StashFormat {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), count = conditions.len(), "read condition stash");
    Ok(conditions)
}
