//! Comments section.

use tracing::warn;

use define_ingest::CommentEntry;
use define_model::{CommentDef, DefineStore, Description, DocumentRef, PdfPageRef, generate_oid};

use crate::builders::require;
use crate::context::BuildContext;
use crate::error::Result;

pub fn build_comments(
    entries: &[CommentEntry],
    store: &mut DefineStore,
    ctx: &BuildContext,
) -> Result<()> {
    for entry in entries {
        let comment = build_comment(entry, ctx)?;
        let oid = comment.oid.clone();
        if !store.push_comment(comment) {
            warn!(oid = %oid, "duplicate CommentDef OID; keeping first definition");
        }
    }
    Ok(())
}

fn build_comment(entry: &CommentEntry, ctx: &BuildContext) -> Result<CommentDef> {
    let oid = match &entry.oid {
        Some(oid) => oid.clone(),
        None => {
            let name = require(entry.name.clone(), "name", "comment entry")?;
            generate_oid(&["COM", &name])
        }
    };
    let context = format!("CommentDef {oid}");

    let mut document_refs = Vec::new();
    if let Some(document) = &entry.document {
        let mut document_ref = DocumentRef::new(document);
        if let Some(pages) = &entry.pages {
            document_ref.page_refs.push(PdfPageRef {
                page_refs: pages.to_string(),
                ref_type: "NamedDestination".to_string(),
            });
        }
        document_refs.push(document_ref);
    }

    Ok(CommentDef {
        description: Description::new(
            require(entry.description.clone(), "description", &context)?,
            &ctx.lang,
        ),
        document_refs,
        oid,
    })
}
