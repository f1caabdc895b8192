//! Dataset (ItemGroupDef) section, including routing of value-level slices.

use tracing::warn;

use define_ingest::{DatasetEntry, SliceEntry};
use define_model::{DefineStore, Description, ItemGroupDef, YesNo, generate_oid};

use crate::builders::{require, value_level, variables};
use crate::context::BuildContext;
use crate::error::Result;

/// Trial design domains; their datasets default to reference data.
const TRIAL_DESIGN_DOMAINS: [&str; 7] = ["TA", "TD", "TE", "TI", "TM", "TS", "TV"];

/// Subject-level domains; one record per subject, never repeating.
const SUBJECT_LEVEL_DOMAINS: [&str; 3] = ["DM", "APDM", "ADSL"];

/// Device/study reference domains treated as non-repeating.
const SINGLE_RECORD_DOMAINS: [&str; 2] = ["DI", "OI"];

pub fn build_datasets(
    entries: &[DatasetEntry],
    store: &mut DefineStore,
    ctx: &BuildContext,
) -> Result<()> {
    for dataset in entries {
        build_dataset(dataset, store, ctx)?;
        for slice in &dataset.slices {
            route_slice(slice, store, ctx)?;
        }
    }
    Ok(())
}

/// Value-level entries are discriminated by their `type` tag rather than
/// being a separate top-level code path.
fn route_slice(slice: &SliceEntry, store: &mut DefineStore, ctx: &BuildContext) -> Result<()> {
    match slice.slice_type.as_deref() {
        Some("ValueList") => value_level::build_value_list(slice, store, ctx),
        other => {
            warn!(slice_type = ?other, "unrecognized slice type; skipping");
            Ok(())
        }
    }
}

fn build_dataset(entry: &DatasetEntry, store: &mut DefineStore, ctx: &BuildContext) -> Result<()> {
    let name = require(entry.name.clone(), "name", "dataset entry")?;
    let context = format!("dataset {name}");
    let description = require(entry.description.clone(), "description", &context)?;

    let oid = generate_oid(&["IG", &name]);
    let domain = name.clone();
    let structure = entry.structure.clone().unwrap_or_else(|| "NA".to_string());

    // Defaulting order matters: repeating depends on the resolved
    // reference-data value.
    let is_reference_data = match entry.is_reference_data.as_deref() {
        Some(value) => YesNo::from(value.eq_ignore_ascii_case("yes")),
        None => default_is_reference(&domain),
    };
    let repeating = match entry.repeating {
        Some(flag) => YesNo::from(flag),
        None => default_repeating(is_reference_data, &domain, &structure),
    };
    let purpose = entry
        .purpose
        .clone()
        .unwrap_or_else(|| "Tabulation".to_string());

    let item_group = ItemGroupDef {
        oid: oid.clone(),
        name: name.clone(),
        domain,
        repeating,
        is_reference_data,
        purpose,
        structure,
        sas_dataset_name: entry.sas_dataset_name.clone(),
        archive_location_id: entry
            .archive_location_id
            .as_ref()
            .map(|id| format!("LF.{id}")),
        comment_oid: entry.comment.clone(),
        is_non_standard: entry.is_non_standard.clone(),
        standard_oid: entry.was_derived_from.clone(),
        has_no_data: entry.has_no_data.clone(),
        description: Description::new(description, &ctx.lang),
        item_refs: Vec::new(),
        class: entry
            .class
            .as_ref()
            .map(|class| class.to_uppercase().replace('-', " ")),
    };

    if !store.push_item_group(item_group) {
        warn!(oid = %oid, "duplicate ItemGroupDef OID; keeping first definition");
        return Ok(());
    }
    variables::build_dataset_variables(&entry.items, &name, &oid, store, ctx)
}

fn default_is_reference(domain: &str) -> YesNo {
    YesNo::from(TRIAL_DESIGN_DOMAINS.contains(&domain))
}

fn default_repeating(is_reference_data: YesNo, domain: &str, structure: &str) -> YesNo {
    if is_reference_data == YesNo::Yes
        || SUBJECT_LEVEL_DOMAINS.contains(&domain)
        || SINGLE_RECORD_DOMAINS.contains(&domain)
    {
        YesNo::No
    } else if structure != "NA" && structure.matches("per").count() == 1 {
        YesNo::No
    } else {
        YesNo::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BuildContext {
        BuildContext {
            lang: "en".to_string(),
            acrf_leaf_id: "LF.acrf".to_string(),
        }
    }

    fn build(json: &str) -> DefineStore {
        let entries: Vec<DatasetEntry> = serde_json::from_str(json).unwrap();
        let mut store = DefineStore::new();
        build_datasets(&entries, &mut store, &ctx()).unwrap();
        store
    }

    #[test]
    fn trial_design_domain_defaults_to_reference_data() {
        let store = build(r#"[{"name": "TS", "description": "Trial Summary"}]"#);
        let group = &store.item_groups()[0];
        assert_eq!(group.is_reference_data, YesNo::Yes);
        assert_eq!(group.repeating, YesNo::No);
        assert_eq!(group.purpose, "Tabulation");
        assert_eq!(group.structure, "NA");
    }

    #[test]
    fn two_per_structure_stays_repeating() {
        let store = build(
            r#"[{"name": "AE", "description": "Adverse Events",
                 "structure": "One record per subject per visit"}]"#,
        );
        let group = &store.item_groups()[0];
        assert_eq!(group.is_reference_data, YesNo::No);
        assert_eq!(group.repeating, YesNo::Yes);
    }

    #[test]
    fn single_per_structure_is_non_repeating() {
        let store = build(
            r#"[{"name": "AE", "description": "Adverse Events",
                 "structure": "One record per adverse event"}]"#,
        );
        assert_eq!(store.item_groups()[0].repeating, YesNo::No);
    }

    #[test]
    fn dm_is_non_repeating_regardless_of_structure() {
        let store = build(
            r#"[{"name": "DM", "description": "Demographics",
                 "structure": "One record per subject per planned visit"}]"#,
        );
        assert_eq!(store.item_groups()[0].repeating, YesNo::No);
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let store = build(
            r#"[{"name": "TS", "description": "Trial Summary",
                 "isReferenceData": "No", "repeating": true}]"#,
        );
        let group = &store.item_groups()[0];
        assert_eq!(group.is_reference_data, YesNo::No);
        assert_eq!(group.repeating, YesNo::Yes);
    }

    #[test]
    fn class_is_normalized_and_archive_location_prefixed() {
        let store = build(
            r#"[{"name": "DM", "description": "Demographics",
                 "class": "special-purpose", "archiveLocationID": "dm"}]"#,
        );
        let group = &store.item_groups()[0];
        assert_eq!(group.class.as_deref(), Some("SPECIAL PURPOSE"));
        assert_eq!(group.archive_location_id.as_deref(), Some("LF.dm"));
        assert_eq!(group.oid, "IG.DM");
    }

    #[test]
    fn missing_description_names_the_dataset() {
        let entries: Vec<DatasetEntry> = serde_json::from_str(r#"[{"name": "DM"}]"#).unwrap();
        let mut store = DefineStore::new();
        let error = build_datasets(&entries, &mut store, &ctx()).unwrap_err();
        assert!(error.to_string().contains("dataset DM"));
    }

    #[test]
    fn variables_join_their_dataset() {
        let store = build(
            r#"[{"name": "DM", "description": "Demographics",
                 "items": [{"name": "USUBJID", "dataType": "text", "mandatory": true}]}]"#,
        );
        let group = &store.item_groups()[0];
        assert_eq!(group.item_refs.len(), 1);
        assert_eq!(group.item_refs[0].item_oid, "IT.DM.USUBJID");
        assert!(store.find_item_def("IT.DM.USUBJID").is_some());
    }
}
