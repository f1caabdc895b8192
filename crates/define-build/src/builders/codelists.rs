//! CodeList section.

use tracing::warn;

use define_ingest::{CodeListEntry, TermEntry};
use define_model::{
    Alias, CodeList, CodeListItem, CodeListTerms, DefineStore, EnumeratedItem, ExternalCodeList,
    TranslatedText, generate_oid,
};

use crate::builders::require;
use crate::context::BuildContext;
use crate::error::Result;
use crate::options::BuildOptions;

pub fn build_code_lists(
    entries: &[CodeListEntry],
    store: &mut DefineStore,
    ctx: &BuildContext,
    options: &BuildOptions,
) -> Result<()> {
    for entry in entries {
        let code_list = build_code_list(entry, ctx, options)?;
        let oid = code_list.oid.clone();
        if !store.push_code_list(code_list) {
            warn!(oid = %oid, "duplicate CodeList OID; keeping first definition");
        }
    }
    Ok(())
}

fn build_code_list(
    entry: &CodeListEntry,
    ctx: &BuildContext,
    options: &BuildOptions,
) -> Result<CodeList> {
    let name = require(entry.name.clone(), "name", "codelist entry")?;
    let context = format!("CodeList {name}");
    let oid = match &entry.oid {
        Some(oid) => oid.clone(),
        None => generate_oid(&["CL", entry.short_name.as_deref().unwrap_or(&name)]),
    };

    // Variant selection: terms present means enumerated/coded; an empty term
    // list stands for an external dictionary, so a placeholder reference is
    // synthesized from the codelist's own name.
    let terms = if entry.code_list_items.is_empty() {
        CodeListTerms::External(ExternalCodeList {
            dictionary: name.clone(),
            version: Some(options.placeholder_dictionary_version.clone()),
            href: Some(options.placeholder_dictionary_href.clone()),
        })
    } else if entry.code_list_items.iter().any(|term| term.decode.is_some()) {
        let mut items = Vec::with_capacity(entry.code_list_items.len());
        for term in &entry.code_list_items {
            items.push(build_code_list_item(term, &context, ctx)?);
        }
        CodeListTerms::Decoded(items)
    } else {
        let mut items = Vec::with_capacity(entry.code_list_items.len());
        for term in &entry.code_list_items {
            items.push(build_enumerated_item(term, &context)?);
        }
        CodeListTerms::Enumerated(items)
    };

    let mut aliases = Vec::new();
    if let Some(code) = &entry.nci_codelist_code {
        aliases.push(nci_alias(code));
    }

    Ok(CodeList {
        oid,
        name,
        data_type: entry.data_type.clone().unwrap_or_else(|| "text".to_string()),
        comment_oid: entry.comment.clone(),
        is_non_standard: entry.is_non_standard.clone(),
        standard_oid: entry.standard_oid.clone(),
        terms,
        aliases,
    })
}

fn build_code_list_item(
    term: &TermEntry,
    context: &str,
    ctx: &BuildContext,
) -> Result<CodeListItem> {
    let coded_value = require(term.coded_value.clone(), "codedValue", context)?;
    // When a term has no decode the submission value doubles as the decode.
    let decode_text = term.decode.clone().unwrap_or_else(|| coded_value.clone());
    Ok(CodeListItem {
        decode: TranslatedText {
            text: decode_text,
            lang: ctx.lang.clone(),
        },
        order_number: term.order,
        alias: term.nci_term_code.as_deref().map(nci_alias),
        coded_value,
    })
}

fn build_enumerated_item(term: &TermEntry, context: &str) -> Result<EnumeratedItem> {
    Ok(EnumeratedItem {
        coded_value: require(term.coded_value.clone(), "codedValue", context)?,
        order_number: term.order,
        alias: term.nci_term_code.as_deref().map(nci_alias),
    })
}

fn nci_alias(code: &str) -> Alias {
    Alias {
        context: "nci:ExtCodeID".to_string(),
        name: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> DefineStore {
        let entries: Vec<CodeListEntry> = serde_json::from_str(json).unwrap();
        let mut store = DefineStore::new();
        let ctx = BuildContext {
            lang: "en".to_string(),
            acrf_leaf_id: "LF.acrf".to_string(),
        };
        build_code_lists(&entries, &mut store, &ctx, &BuildOptions::default()).unwrap();
        store
    }

    #[test]
    fn decode_falls_back_to_coded_value() {
        let store = build(
            r#"[{
                "shortName": "SEX", "name": "Sex",
                "codeListItems": [
                    {"codedValue": "M", "decode": "Male"},
                    {"codedValue": "F"}
                ]
            }]"#,
        );
        let code_list = store.find_code_list("CL.SEX").unwrap();
        let CodeListTerms::Decoded(items) = &code_list.terms else {
            panic!("expected decoded terms");
        };
        assert_eq!(items[0].decode.text, "Male");
        assert_eq!(items[1].coded_value, "F");
        assert_eq!(items[1].decode.text, "F");
    }

    #[test]
    fn all_terms_without_decodes_become_enumerated() {
        let store = build(
            r#"[{
                "OID": "CL.NY", "name": "No Yes Response",
                "codeListItems": [{"codedValue": "N"}, {"codedValue": "Y"}]
            }]"#,
        );
        let code_list = store.find_code_list("CL.NY").unwrap();
        assert!(matches!(&code_list.terms, CodeListTerms::Enumerated(items) if items.len() == 2));
    }

    #[test]
    fn empty_term_list_synthesizes_external_reference() {
        let store = build(r#"[{"OID": "CL.MEDDRA", "name": "MedDRA", "codeListItems": []}]"#);
        let code_list = store.find_code_list("CL.MEDDRA").unwrap();
        let CodeListTerms::External(external) = &code_list.terms else {
            panic!("expected external codelist");
        };
        assert_eq!(external.dictionary, "MedDRA");
        assert_eq!(external.version.as_deref(), Some("1.0"));
        assert_eq!(external.href.as_deref(), Some("https://www.iso.org"));
    }

    #[test]
    fn nci_codes_become_aliases() {
        let store = build(
            r#"[{
                "OID": "CL.SEX", "name": "Sex", "nciCodelistCode": "C66731",
                "codeListItems": [{"codedValue": "M", "decode": "Male", "nciTermCode": "C20197"}]
            }]"#,
        );
        let code_list = store.find_code_list("CL.SEX").unwrap();
        assert_eq!(code_list.aliases[0].name, "C66731");
        assert_eq!(code_list.aliases[0].context, "nci:ExtCodeID");
        let CodeListTerms::Decoded(items) = &code_list.terms else {
            panic!("expected decoded terms");
        };
        assert_eq!(items[0].alias.as_ref().unwrap().name, "C20197");
    }

    #[test]
    fn term_without_coded_value_names_the_codelist() {
        let entries: Vec<CodeListEntry> = serde_json::from_str(
            r#"[{"OID": "CL.SEX", "name": "Sex", "codeListItems": [{"decode": "Male"}]}]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        let ctx = BuildContext {
            lang: "en".to_string(),
            acrf_leaf_id: "LF.acrf".to_string(),
        };
        let error =
            build_code_lists(&entries, &mut store, &ctx, &BuildOptions::default()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("codedValue"));
        assert!(message.contains("CodeList Sex"));
    }
}
