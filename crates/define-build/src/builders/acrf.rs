//! Annotated CRF section.

use tracing::warn;

use define_ingest::DocumentEntry;
use define_model::{AnnotatedCrf, DefineStore, DocumentRef, Leaf};

use crate::builders::require;
use crate::error::Result;
use crate::options::BuildOptions;

/// Build one AnnotatedCRF wrapper plus its leaf per entry. The leaf keeps
/// the entry's own `leafID` so origin page references resolve against it.
pub fn build_annotated_crf(
    entries: &[DocumentEntry],
    store: &mut DefineStore,
    options: &BuildOptions,
) -> Result<()> {
    for entry in entries {
        let leaf_id = require(entry.leaf_id.clone(), "leafID", "annotatedCRF entry")?;
        let context = format!("annotatedCRF {leaf_id}");
        store.push_annotated_crf(AnnotatedCrf {
            document_ref: DocumentRef::new(&leaf_id),
        });
        let leaf = Leaf {
            id: leaf_id.clone(),
            href: entry
                .href
                .clone()
                .unwrap_or_else(|| options.acrf_href.clone()),
            title: require(entry.title.clone(), "title", &context)?,
        };
        if !store.push_leaf(leaf) {
            warn!(id = %leaf_id, "duplicate leaf ID; keeping first definition");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_acrf_and_leaf() {
        let entries: Vec<DocumentEntry> = serde_json::from_str(
            r#"[{"leafID": "LF.acrf", "href": "blankcrf.pdf", "title": "Annotated CRF"}]"#,
        )
        .unwrap();
        let mut store = DefineStore::new();
        build_annotated_crf(&entries, &mut store, &BuildOptions::default()).unwrap();
        assert_eq!(store.annotated_crfs().len(), 1);
        assert_eq!(store.annotated_crfs()[0].document_ref.leaf_id, "LF.acrf");
        assert_eq!(store.leaves()[0].href, "blankcrf.pdf");
    }

    #[test]
    fn href_defaults_when_absent() {
        let entries: Vec<DocumentEntry> =
            serde_json::from_str(r#"[{"leafID": "LF.acrf", "title": "Annotated CRF"}]"#).unwrap();
        let mut store = DefineStore::new();
        build_annotated_crf(&entries, &mut store, &BuildOptions::default()).unwrap();
        assert_eq!(store.leaves()[0].href, "acrf.pdf");
    }
}
