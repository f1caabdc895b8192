//! WhereClauseDef construction.
//!
//! Each where-clause entry resolves its condition references against the
//! stash and inlines their range-checks. A reference to a condition that was
//! never stashed is a structurally malformed input and aborts generation.

use tracing::warn;

use define_ingest::WhereClauseEntry;
use define_model::{DefineStore, StashedRangeCheck, WhereClauseDef};

use crate::builders::require;
use crate::error::{BuildError, Result};

pub fn build_where_clauses(entries: &[WhereClauseEntry], store: &mut DefineStore) -> Result<()> {
    for entry in entries {
        let oid = require(entry.oid.clone(), "OID", "where-clause entry")?;
        let mut range_checks = Vec::new();
        for condition_oid in &entry.conditions {
            let stashed = store.stashed_condition(condition_oid).ok_or_else(|| {
                BuildError::UnresolvedReference {
                    family: "Condition",
                    oid: condition_oid.clone(),
                    referrer: format!("WhereClauseDef {oid}"),
                }
            })?;
            range_checks.extend(
                stashed
                    .range_checks
                    .iter()
                    .map(StashedRangeCheck::to_range_check),
            );
        }
        let where_clause = WhereClauseDef {
            oid: oid.clone(),
            range_checks,
        };
        if !store.push_where_clause(where_clause) {
            warn!(oid = %oid, "duplicate WhereClauseDef OID; keeping first definition");
        }
    }
    Ok(())
}
