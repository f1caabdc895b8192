//! Variable (ItemDef/ItemRef) construction.
//!
//! Used by both the dataset builder (ordinary variables) and the value-level
//! builder (conditional redefinitions); both append to the same shared
//! ItemDef collection.

use tracing::debug;

use define_ingest::{CodeListRefShape, ValueListRefShape, VariableEntry};
use define_model::{
    DefineStore, Description, DocumentRef, ItemDef, ItemRef, Origin, PdfPageRef, YesNo,
    generate_oid,
};

use crate::builders::require;
use crate::context::BuildContext;
use crate::error::{BuildError, Result};

/// Build the ItemDefs and ItemRefs for one dataset's variables. The target
/// dataset is resolved through the store by OID; a miss aborts generation
/// naming the missing dataset.
pub fn build_dataset_variables(
    entries: &[VariableEntry],
    dataset_name: &str,
    dataset_oid: &str,
    store: &mut DefineStore,
    ctx: &BuildContext,
) -> Result<()> {
    for variable in entries {
        let entry_context = format!("item in dataset {dataset_name}");
        let name = require(variable.name.clone(), "name", &entry_context)?;
        let item_oid = match &variable.oid {
            Some(oid) => oid.clone(),
            None => generate_oid(&["IT", dataset_name, &name]),
        };
        let context = format!("ItemDef {dataset_name}.{name}");

        let item = build_item_def(variable, &item_oid, Some(dataset_name), &context, ctx)?;
        if !store.push_item_def(item) {
            debug!(oid = %item_oid, "duplicate ItemDef OID; keeping first definition");
        }

        let item_ref = build_item_ref(variable, &item_oid);
        let group = store.item_group_mut(dataset_oid).map_err(|_| {
            BuildError::UnresolvedReference {
                family: "ItemGroupDef",
                oid: dataset_oid.to_string(),
                referrer: format!("ItemRef {item_oid}"),
            }
        })?;
        group.item_refs.push(item_ref);
    }
    Ok(())
}

/// Build one ItemDef from a variable entry.
///
/// `dataset_name` feeds the derived value-list OID when the entry flags
/// value-list participation without naming an explicit OID; value-level
/// redefinitions pass `None` since their OIDs always arrive explicit.
pub fn build_item_def(
    entry: &VariableEntry,
    oid: &str,
    dataset_name: Option<&str>,
    context: &str,
    ctx: &BuildContext,
) -> Result<ItemDef> {
    let name = require(entry.name.clone(), "name", context)?;
    let data_type = require(entry.data_type.clone(), "dataType", context)?;

    let mut item = ItemDef {
        oid: oid.to_string(),
        sas_field_name: name.clone(),
        name,
        data_type,
        length: entry.length,
        significant_digits: entry.significant_digits,
        display_format: entry.display_format.clone().or_else(|| entry.format.clone()),
        comment_oid: entry.comment.clone(),
        description: entry
            .description
            .as_ref()
            .map(|text| Description::new(text, &ctx.lang)),
        codelist_ref: entry.code_list.as_ref().and_then(codelist_oid),
        origins: Vec::new(),
        value_list_ref: None,
    };

    if let Some(origin) = &entry.origin {
        let origin_type = require(origin.origin_type.clone(), "origin.type", context)?;
        let mut built = Origin {
            origin_type,
            source: origin.source.clone(),
            description: None,
            document_refs: Vec::new(),
        };
        if let Some(predecessor) = &entry.predecessor {
            built.description = Some(Description::new(predecessor, &ctx.lang));
        }
        if let Some(pages) = &entry.pages {
            let mut document_ref = DocumentRef::new(&ctx.acrf_leaf_id);
            document_ref.page_refs.push(PdfPageRef {
                page_refs: pages.to_string(),
                ref_type: "PhysicalRef".to_string(),
            });
            built.document_refs.push(document_ref);
        }
        item.origins.push(built);
    }

    item.value_list_ref = match &entry.value_list {
        Some(ValueListRefShape::Flag(true)) => dataset_name
            .map(|dataset| generate_oid(&["VL", dataset, &item.name])),
        Some(ValueListRefShape::Flag(false)) | None => None,
        Some(ValueListRefShape::Oid(oid)) => Some(generate_oid(&["VL", oid])),
    };

    Ok(item)
}

/// Build one ItemRef from a variable entry. Mandatory defaults to "No" when
/// unspecified.
pub fn build_item_ref(entry: &VariableEntry, item_oid: &str) -> ItemRef {
    let mut item_ref = ItemRef::new(item_oid, YesNo::from(entry.mandatory.unwrap_or(false)));
    item_ref.method_oid = entry.method.clone();
    item_ref.order_number = entry.order;
    item_ref.key_sequence = entry.key_sequence;
    item_ref.role = entry.role.clone();
    item_ref.is_non_standard = entry.is_non_standard.clone();
    item_ref.has_no_data = entry.has_no_data.clone();
    item_ref
}

/// Resolve the two supported codelist-reference shapes to a CodeList OID:
/// a list of short names uses its first element, a dotted reference string
/// its second token.
fn codelist_oid(shape: &CodeListRefShape) -> Option<String> {
    let short_name = match shape {
        CodeListRefShape::Names(names) => names.first()?.clone(),
        CodeListRefShape::Reference(reference) => reference
            .split('.')
            .nth(1)
            .map(str::to_string)
            .unwrap_or_else(|| reference.clone()),
    };
    Some(generate_oid(&["CL", &short_name]))
}
