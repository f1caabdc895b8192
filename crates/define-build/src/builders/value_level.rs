//! Value-level metadata (ValueListDef) construction.

use tracing::{debug, warn};

use define_ingest::SliceEntry;
use define_model::{DefineStore, ValueListDef};

use crate::builders::{require, variables};
use crate::context::BuildContext;
use crate::error::{BuildError, Result};

/// Build one ValueListDef from a value-level slice.
///
/// Each contained redefinition gets an ItemRef with exactly one
/// WhereClauseRef — the first `applicableWhen` entry. Additional entries are
/// ignored; combining multiple clauses is an open product decision, not
/// something to guess here. The underlying ItemDefs go through the shared
/// variable builder and land in the shared ItemDef collection.
pub fn build_value_list(
    slice: &SliceEntry,
    store: &mut DefineStore,
    ctx: &BuildContext,
) -> Result<()> {
    let oid = require(slice.oid.clone(), "OID", "value-level slice")?;
    let mut value_list = ValueListDef {
        oid: oid.clone(),
        item_refs: Vec::new(),
    };

    for item in &slice.items {
        let context = format!("value-level item in {oid}");
        let item_oid = require(item.oid.clone(), "OID", &context)?;
        let context = format!("ItemDef {item_oid}");

        let mut item_ref = variables::build_item_ref(item, &item_oid);
        let where_clause_oid = item.applicable_when.first().ok_or_else(|| {
            BuildError::MissingField {
                field: "applicableWhen",
                context: context.clone(),
            }
        })?;
        if item.applicable_when.len() > 1 {
            debug!(
                item = %item_oid,
                count = item.applicable_when.len(),
                "multiple applicableWhen references; using the first"
            );
        }
        item_ref.where_clause_refs.push(where_clause_oid.clone());
        value_list.item_refs.push(item_ref);

        let item_def = variables::build_item_def(item, &item_oid, None, &context, ctx)?;
        if !store.push_item_def(item_def) {
            debug!(oid = %item_oid, "duplicate ItemDef OID; keeping first definition");
        }
    }

    if !store.push_value_list(value_list) {
        warn!(oid = %oid, "duplicate ValueListDef OID; keeping first definition");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use define_model::YesNo;

    use super::*;

    fn ctx() -> BuildContext {
        BuildContext {
            lang: "en".to_string(),
            acrf_leaf_id: "LF.acrf".to_string(),
        }
    }

    fn slice(json: &str) -> SliceEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_value_list_with_single_where_clause_ref() {
        let slice = slice(
            r#"{
                "OID": "VL.VS.VSORRES",
                "type": "ValueList",
                "items": [{
                    "OID": "IT.VS.VSORRES.TEMP",
                    "name": "VSORRES",
                    "dataType": "float",
                    "mandatory": false,
                    "order": 1,
                    "applicableWhen": ["WC.VS.df8e6ed8", "WC.VS.extra"],
                    "significantDigits": 3,
                    "displayFormat": "8.3"
                }]
            }"#,
        );
        let mut store = DefineStore::new();
        build_value_list(&slice, &mut store, &ctx()).unwrap();

        let value_list = &store.value_lists()[0];
        assert_eq!(value_list.oid, "VL.VS.VSORRES");
        let item_ref = &value_list.item_refs[0];
        assert_eq!(item_ref.item_oid, "IT.VS.VSORRES.TEMP");
        assert_eq!(item_ref.mandatory, YesNo::No);
        assert_eq!(item_ref.order_number, Some(1));
        // Only the first applicableWhen reference is carried.
        assert_eq!(item_ref.where_clause_refs, vec!["WC.VS.df8e6ed8"]);

        let item_def = store.find_item_def("IT.VS.VSORRES.TEMP").unwrap();
        assert_eq!(item_def.data_type, "float");
        assert_eq!(item_def.significant_digits, Some(3));
        assert_eq!(item_def.display_format.as_deref(), Some("8.3"));
    }

    #[test]
    fn missing_applicable_when_is_an_error() {
        let slice = slice(
            r#"{
                "OID": "VL.VS.VSORRES",
                "type": "ValueList",
                "items": [{"OID": "IT.VS.VSORRES.TEMP", "name": "VSORRES", "dataType": "float"}]
            }"#,
        );
        let mut store = DefineStore::new();
        let error = build_value_list(&slice, &mut store, &ctx()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("applicableWhen"));
        assert!(message.contains("IT.VS.VSORRES.TEMP"));
    }

    #[test]
    fn missing_item_oid_is_an_error() {
        let slice = slice(
            r#"{
                "OID": "VL.VS.VSORRES",
                "type": "ValueList",
                "items": [{"name": "VSORRES", "dataType": "float"}]
            }"#,
        );
        let mut store = DefineStore::new();
        let error = build_value_list(&slice, &mut store, &ctx()).unwrap_err();
        assert!(error.to_string().contains("VL.VS.VSORRES"));
    }
}
