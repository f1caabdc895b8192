//! External dictionaries and concept properties.
//!
//! Both sections share one entry shape and produce CodeLists backed by an
//! ExternalCodeList reference instead of local terms.

use tracing::warn;

use define_ingest::DictionaryEntry;
use define_model::{CodeList, CodeListTerms, DefineStore, ExternalCodeList, generate_oid};

use crate::builders::require;
use crate::error::Result;

pub fn build_dictionaries(
    entries: &[DictionaryEntry],
    store: &mut DefineStore,
    section: &str,
) -> Result<()> {
    for entry in entries {
        let short_name = require(
            entry.short_name.clone(),
            "shortName",
            &format!("{section} entry"),
        )?;
        let oid = generate_oid(&["CL", &short_name]);
        let context = format!("{section} entry {oid}");
        let code_list = CodeList {
            name: require(entry.name.clone(), "name", &context)?,
            data_type: entry.data_type.clone().unwrap_or_else(|| "text".to_string()),
            comment_oid: None,
            is_non_standard: None,
            standard_oid: None,
            terms: CodeListTerms::External(ExternalCodeList {
                dictionary: require(entry.dictionary.clone(), "dictionary", &context)?,
                version: entry.version.as_ref().map(ToString::to_string),
                href: entry.href.clone(),
            }),
            aliases: Vec::new(),
            oid: oid.clone(),
        };
        if !store.push_code_list(code_list) {
            warn!(oid = %oid, "duplicate CodeList OID; keeping first definition");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_external_code_list() {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(
            r#"[{
                "shortName": "AE Dictionary",
                "name": "MedDRA",
                "dataType": "text",
                "dictionary": "MEDDRA",
                "version": 27.0
            }]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        build_dictionaries(&entries, &mut store, "dictionaries").unwrap();
        let code_list = store.find_code_list("CL.AE-DICTIONARY").unwrap();
        assert_eq!(code_list.name, "MedDRA");
        let CodeListTerms::External(external) = &code_list.terms else {
            panic!("expected external codelist");
        };
        assert_eq!(external.dictionary, "MEDDRA");
        assert_eq!(external.version.as_deref(), Some("27.0"));
    }

    #[test]
    fn missing_dictionary_names_the_section() {
        let entries: Vec<DictionaryEntry> =
            serde_json::from_str(r#"[{"shortName": "AE Dictionary", "name": "MedDRA"}]"#).unwrap();
        let mut store = DefineStore::new();
        let error = build_dictionaries(&entries, &mut store, "conceptProperties").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("dictionary"));
        assert!(message.contains("conceptProperties"));
    }
}
