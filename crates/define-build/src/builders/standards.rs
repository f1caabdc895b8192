//! Standards section.

use tracing::warn;

use define_ingest::StandardEntry;
use define_model::{DefineStore, Standard, generate_oid};

use crate::builders::require;
use crate::error::Result;

pub fn build_standards(entries: &[StandardEntry], store: &mut DefineStore) -> Result<()> {
    for (number, entry) in entries.iter().enumerate() {
        let standard = build_standard(entry, number + 1)?;
        if !store.push_standard(standard) {
            warn!(ordinal = number + 1, "duplicate Standard OID; keeping first definition");
        }
    }
    Ok(())
}

fn build_standard(entry: &StandardEntry, number: usize) -> Result<Standard> {
    let oid = match &entry.oid {
        Some(oid) => oid.clone(),
        None => generate_oid(&["ST", &number.to_string()]),
    };
    let context = format!("Standard {oid}");
    Ok(Standard {
        name: require(entry.name.clone(), "name", &context)?,
        standard_type: require(entry.standard_type.clone(), "type", &context)?,
        version: require(entry.version.as_ref(), "version", &context)?.to_string(),
        status: entry.status.clone().unwrap_or_else(|| "Final".to_string()),
        publishing_set: entry.publishing_set.clone(),
        comment_oid: entry.comment.clone(),
        oid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_ordinal_oids_and_defaults_status() {
        let entries: Vec<StandardEntry> = serde_json::from_str(
            r#"[
                {"name": "SDTMIG", "type": "IG", "version": "3.4"},
                {"name": "CDISC/NCI", "type": "CT", "version": "2025-03-24", "publishingSet": "SDTM"}
            ]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        build_standards(&entries, &mut store).unwrap();
        let standards = store.standards();
        assert_eq!(standards[0].oid, "ST.1");
        assert_eq!(standards[0].status, "Final");
        assert_eq!(standards[1].oid, "ST.2");
        assert_eq!(standards[1].publishing_set.as_deref(), Some("SDTM"));
    }

    #[test]
    fn numeric_version_is_stringified() {
        let entries: Vec<StandardEntry> =
            serde_json::from_str(r#"[{"name": "SDTMIG", "type": "IG", "version": 3.4}]"#).unwrap();
        let mut store = DefineStore::new();
        build_standards(&entries, &mut store).unwrap();
        assert_eq!(store.standards()[0].version, "3.4");
    }

    #[test]
    fn missing_type_is_an_error() {
        let entries: Vec<StandardEntry> =
            serde_json::from_str(r#"[{"OID": "ST.9", "name": "SDTMIG", "version": "3.4"}]"#)
                .unwrap();
        let mut store = DefineStore::new();
        let error = build_standards(&entries, &mut store).unwrap_err();
        assert!(error.to_string().contains("Standard ST.9"));
    }
}
