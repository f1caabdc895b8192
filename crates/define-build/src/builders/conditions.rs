//! Condition flattening.
//!
//! Conditions never reach the output tree; they are flattened into the
//! store's private stash and consumed once by where-clause construction.

use tracing::warn;

use define_ingest::ConditionEntry;
use define_model::{DefineStore, StashedCondition, StashedRangeCheck};

use crate::builders::require;
use crate::error::Result;

pub fn build_conditions(entries: &[ConditionEntry], store: &mut DefineStore) -> Result<()> {
    for entry in entries {
        let condition = flatten_condition(entry)?;
        let oid = condition.oid.clone();
        if !store.stash_condition(condition) {
            warn!(oid = %oid, "duplicate condition OID; keeping first definition");
        }
    }
    Ok(())
}

/// Flatten one condition entry into its stash representation, preserving
/// check-value order and comparator content exactly.
pub fn flatten_condition(entry: &ConditionEntry) -> Result<StashedCondition> {
    let oid = require(entry.oid.clone(), "OID", "condition entry")?;
    let context = format!("condition {oid}");
    let mut range_checks = Vec::with_capacity(entry.range_checks.len());
    for range_check in &entry.range_checks {
        range_checks.push(StashedRangeCheck {
            soft_hard: "Soft".to_string(),
            item_oid: require(range_check.item.clone(), "item", &context)?,
            comparator: require(range_check.comparator.clone(), "comparator", &context)?,
            check_values: range_check.check_values.clone(),
        });
    }
    Ok(StashedCondition { oid, range_checks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_range_checks_into_the_stash() {
        let entries: Vec<ConditionEntry> = serde_json::from_str(
            r#"[{
                "OID": "COND.VS.TEMP",
                "rangeChecks": [
                    {"item": "IT.VS.VSTESTCD", "comparator": "EQ", "checkValues": ["TEMP"]}
                ]
            }]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        build_conditions(&entries, &mut store).unwrap();
        let stashed = store.stashed_condition("COND.VS.TEMP").unwrap();
        assert_eq!(stashed.range_checks.len(), 1);
        assert_eq!(stashed.range_checks[0].soft_hard, "Soft");
        assert_eq!(stashed.range_checks[0].item_oid, "IT.VS.VSTESTCD");
        assert_eq!(stashed.range_checks[0].check_values, vec!["TEMP"]);
    }

    #[test]
    fn missing_comparator_names_the_condition() {
        let entries: Vec<ConditionEntry> = serde_json::from_str(
            r#"[{"OID": "COND.X", "rangeChecks": [{"item": "IT.A.B", "checkValues": []}]}]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        let error = build_conditions(&entries, &mut store).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("comparator"));
        assert!(message.contains("condition COND.X"));
    }
}
