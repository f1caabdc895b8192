//! External schema validation post-step.
//!
//! Validation is delegated to `xmllint` as an external black box. The
//! outcome is reported to the caller; a failed validation (or a missing
//! validator) never aborts generation — the document has already been
//! written by the time this runs.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Result of an external schema-validation run.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub passed: bool,
    /// Validator diagnostics, one entry per line of output.
    pub messages: Vec<String>,
}

/// Validate a written Define-XML file against an XSD using `xmllint`.
///
/// Returns an error only when the validator itself cannot be started;
/// schema violations come back as a failed [`ValidationOutcome`].
pub fn validate_with_xmllint(define_file: &Path, schema: &Path) -> Result<ValidationOutcome> {
    debug!(file = %define_file.display(), schema = %schema.display(), "running xmllint");
    let output = Command::new("xmllint")
        .arg("--schema")
        .arg(schema)
        .arg(define_file)
        .arg("--noout")
        .output()
        .context("run xmllint (is it installed?)")?;

    let mut messages: Vec<String> = String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect();
    messages.retain(|line| !line.trim().is_empty());

    Ok(ValidationOutcome {
        passed: output.status.success(),
        messages,
    })
}
