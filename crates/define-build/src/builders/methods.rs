//! Methods section.

use tracing::warn;

use define_ingest::MethodEntry;
use define_model::{DefineStore, Description, DocumentRef, FormalExpression, MethodDef, PdfPageRef};

use crate::builders::require;
use crate::context::BuildContext;
use crate::error::Result;

pub fn build_methods(
    entries: &[MethodEntry],
    store: &mut DefineStore,
    ctx: &BuildContext,
) -> Result<()> {
    for entry in entries {
        let method = build_method(entry, ctx)?;
        let oid = method.oid.clone();
        if !store.push_method(method) {
            warn!(oid = %oid, "duplicate MethodDef OID; keeping first definition");
        }
    }
    Ok(())
}

fn build_method(entry: &MethodEntry, ctx: &BuildContext) -> Result<MethodDef> {
    let oid = require(entry.oid.clone(), "OID", "method entry")?;
    let context = format!("MethodDef {oid}");

    let formal_expression = match &entry.context {
        Some(expression_context) => Some(FormalExpression {
            context: expression_context.clone(),
            code: require(entry.code.clone(), "code", &context)?,
        }),
        None => None,
    };

    let mut document_refs = Vec::new();
    if let Some(document) = &entry.document {
        let mut document_ref = DocumentRef::new(document);
        if let Some(pages) = &entry.pages {
            document_ref.page_refs.push(PdfPageRef {
                page_refs: pages.to_string(),
                ref_type: "namedDestination".to_string(),
            });
        }
        document_refs.push(document_ref);
    }

    Ok(MethodDef {
        name: require(entry.name.clone(), "name", &context)?,
        method_type: require(entry.method_type.clone(), "type", &context)?,
        description: Description::new(
            require(entry.description.clone(), "description", &context)?,
            &ctx.lang,
        ),
        formal_expression,
        document_refs,
        oid,
    })
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

    #[test]
    fn builds_method_with_expression_and_document() {
        let entries: Vec<MethodEntry> = serde_json::from_str(
            r#"[{
                "OID": "MT.DM.AGE",
                "name": "Age Derivation",
                "type": "Computation",
                "description": "Age at informed consent",
                "context": "SAS",
                "code": "AGE = floor((RFICDTC - BRTHDTC) / 365.25);",
                "document": "LF.sap",
                "pages": "22"
            }]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        build_methods(&entries, &mut store, &ctx()).unwrap();
        let method = &store.methods()[0];
        assert_eq!(method.oid, "MT.DM.AGE");
        assert_eq!(method.method_type, "Computation");
        let expression = method.formal_expression.as_ref().unwrap();
        assert_eq!(expression.context, "SAS");
        assert!(expression.code.starts_with("AGE ="));
        assert_eq!(method.document_refs[0].leaf_id, "LF.sap");
        assert_eq!(method.document_refs[0].page_refs[0].ref_type, "namedDestination");
    }

    #[test]
    fn code_is_required_when_context_present() {
        let entries: Vec<MethodEntry> = serde_json::from_str(
            r#"[{"OID": "MT.X", "name": "X", "type": "Computation",
                 "description": "d", "context": "SAS"}]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        let error = build_methods(&entries, &mut store, &ctx()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("code"));
        assert!(message.contains("MethodDef MT.X"));
    }
}
