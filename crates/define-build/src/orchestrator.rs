//! Generation orchestration.
//!
//! Reads the parsed DDS value, builds the Study/MetaDataVersion singletons
//! first (other builders read the resolved language and annotated-CRF
//! identifier from them), dispatches every registered list-valued section in
//! the registry's fixed order, then assembles the document from the
//! populated store.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use define_ingest::StudyHeader;
use define_model::{AnnotatedCrf, DefineDocument, DefineStore, DocumentRef, Leaf, StashedCondition};

use crate::builders;
use crate::context::BuildContext;
use crate::error::{BuildError, Result};
use crate::options::BuildOptions;
use crate::registry::Section;

/// Top-level scalar keys consumed by the study builder; everything else
/// scalar is passed through untouched.
const STUDY_KEYS: [&str; 5] = [
    "studyOID",
    "studyName",
    "studyDescription",
    "protocolName",
    "language",
];

/// Non-entity outcomes of a generation run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// List-valued sections with no registered builder, skipped with a
    /// warning.
    pub skipped_sections: Vec<String>,
    /// Unknown scalar keys retained as pass-through attributes.
    pub passthrough_attributes: BTreeMap<String, Value>,
}

/// Build the complete document from a parsed DDS value.
pub fn build_document(input: &Value, options: &BuildOptions) -> Result<(DefineDocument, BuildReport)> {
    build_document_with_conditions(input, options, Vec::new())
}

/// Build the document with a pre-seeded condition stash, used when condition
/// flattening ran as a separate pass. Inline conditions in the input are
/// still processed; the stash's first-definition-wins policy applies across
/// both sources.
pub fn build_document_with_conditions(
    input: &Value,
    options: &BuildOptions,
    preloaded_conditions: Vec<StashedCondition>,
) -> Result<(DefineDocument, BuildReport)> {
    let root = input.as_object().ok_or(BuildError::RootNotAnObject)?;

    let header: StudyHeader = serde_json::from_value(input.clone()).map_err(|source| {
        BuildError::SectionShape {
            section: "study metadata".to_string(),
            source,
        }
    })?;
    let ctx = BuildContext {
        lang: header
            .language
            .clone()
            .unwrap_or_else(|| options.language.clone()),
        acrf_leaf_id: header
            .annotated_crf
            .first()
            .and_then(|entry| entry.leaf_id.clone())
            .unwrap_or_else(|| options.acrf_leaf_id.clone()),
    };

    let mut store = DefineStore::new();
    builders::study::build_study(&header, &mut store)?;
    for condition in preloaded_conditions {
        store.stash_condition(condition);
    }

    for section in Section::PROCESSING_ORDER {
        let Some(value) = root.get(section.name()) else {
            continue;
        };
        let Some(list) = value.as_array() else {
            continue;
        };
        info!(section = section.name(), entries = list.len(), "processing section");
        dispatch(section, list, &mut store, &ctx, options)?;
    }

    let mut report = BuildReport::default();
    for (key, value) in root {
        if STUDY_KEYS.contains(&key.as_str()) {
            continue;
        }
        if value.is_array() {
            if Section::from_name(key).is_none() {
                warn!(section = %key, "unknown section has no registered builder; skipping");
                report.skipped_sections.push(key.clone());
            }
        } else {
            report.passthrough_attributes.insert(key.clone(), value.clone());
        }
    }

    // The template carries no supplemental documents, but origin page
    // references still need a resolvable annotated-CRF leaf.
    if store.annotated_crfs().is_empty() {
        store.push_annotated_crf(AnnotatedCrf {
            document_ref: DocumentRef::new(&ctx.acrf_leaf_id),
        });
        store.push_leaf(Leaf {
            id: ctx.acrf_leaf_id.clone(),
            href: options.acrf_href.clone(),
            title: options.acrf_title.clone(),
        });
    }

    let document = store.into_document()?;
    Ok((document, report))
}

/// Collect the flattened condition stash from the input without building the
/// rest of the document — the producer side of the two-pass deployment.
pub fn collect_conditions(input: &Value) -> Result<Vec<StashedCondition>> {
    let root = input.as_object().ok_or(BuildError::RootNotAnObject)?;
    let Some(value) = root.get(Section::Conditions.name()) else {
        return Ok(Vec::new());
    };
    let entries: Vec<define_ingest::ConditionEntry> = parse(Section::Conditions, value.clone())?;
    let mut conditions = Vec::with_capacity(entries.len());
    for entry in &entries {
        conditions.push(builders::conditions::flatten_condition(entry)?);
    }
    Ok(conditions)
}

/// Route one section to its builder. The match over the closed [`Section`]
/// set replaces the legacy dynamic-evaluation dispatch.
fn dispatch(
    section: Section,
    list: &[Value],
    store: &mut DefineStore,
    ctx: &BuildContext,
    options: &BuildOptions,
) -> Result<()> {
    let value = Value::Array(list.to_vec());
    match section {
        Section::Standards => builders::standards::build_standards(&parse::<Vec<_>>(section, value)?, store),
        Section::AnnotatedCrf => {
            builders::acrf::build_annotated_crf(&parse::<Vec<_>>(section, value)?, store, options)
        }
        Section::Documents => builders::documents::build_documents(&parse::<Vec<_>>(section, value)?, store),
        Section::ItemGroups => builders::datasets::build_datasets(&parse::<Vec<_>>(section, value)?, store, ctx),
        Section::CodeLists => {
            builders::codelists::build_code_lists(&parse::<Vec<_>>(section, value)?, store, ctx, options)
        }
        Section::Dictionaries | Section::ConceptProperties => {
            builders::dictionaries::build_dictionaries(&parse::<Vec<_>>(section, value)?, store, section.name())
        }
        Section::Conditions => builders::conditions::build_conditions(&parse::<Vec<_>>(section, value)?, store),
        Section::WhereClauses => {
            builders::where_clauses::build_where_clauses(&parse::<Vec<_>>(section, value)?, store)
        }
        Section::Methods => builders::methods::build_methods(&parse::<Vec<_>>(section, value)?, store, ctx),
        Section::Comments => builders::comments::build_comments(&parse::<Vec<_>>(section, value)?, store, ctx),
    }
}

fn parse<T: DeserializeOwned>(section: Section, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| BuildError::SectionShape {
        section: section.name().to_string(),
        source,
    })
}
