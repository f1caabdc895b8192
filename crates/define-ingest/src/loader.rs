//! DDS file loading.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Load and parse a DDS JSON file into a raw JSON value.
///
/// The raw value keeps the top-level section layout intact so the
/// orchestrator can route list-valued sections and retain unknown scalar
/// keys as pass-through attributes. A missing file and a parse failure are
/// distinct errors so that callers can exit with scriptable status codes.
pub fn load_dds(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|error| IngestError::Parse {
        path: path.to_path_buf(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    })?;
    debug!(path = %path.display(), "loaded DDS input");
    Ok(value)
}
