//! Supporting documents section.

use tracing::warn;

use define_ingest::DocumentEntry;
use define_model::{DefineStore, Leaf};

use crate::builders::require;
use crate::error::Result;

pub fn build_documents(entries: &[DocumentEntry], store: &mut DefineStore) -> Result<()> {
    for entry in entries {
        let id = require(
            entry.id.clone().or_else(|| entry.leaf_id.clone()),
            "ID",
            "document entry",
        )?;
        let context = format!("document {id}");
        let leaf = Leaf {
            href: require(entry.href.clone(), "href", &context)?,
            title: require(entry.title.clone(), "title", &context)?,
            id,
        };
        let leaf_id = leaf.id.clone();
        if !store.push_leaf(leaf) {
            warn!(id = %leaf_id, "duplicate leaf ID; keeping first definition");
        }
    }
    Ok(())
}
