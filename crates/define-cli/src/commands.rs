//! Command drivers for the dds2define CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use define_build::{
    BuildOptions, build_document_with_conditions, collect_conditions, read_stash, write_stash,
};
use define_ingest::load_dds;
use define_model::DefineDocument;
use define_report::{DefineXmlOptions, ValidationOutcome, validate_with_xmllint, write_define_xml};

use crate::cli::{ConditionsArgs, GenerateArgs};

/// Outcome of a generate run, consumed by the summary printer.
#[derive(Debug)]
pub struct GenerateResult {
    pub study_name: String,
    pub output_path: PathBuf,
    /// (family, count) pairs in output order.
    pub entity_counts: Vec<(&'static str, usize)>,
    pub skipped_sections: Vec<String>,
    pub validation: Option<ValidationOutcome>,
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let input = load_dds(&args.dds_file)?;

    let preloaded = match &args.conditions_file {
        Some(path) => {
            let conditions = read_stash(path)?;
            info!(count = conditions.len(), "loaded persisted condition stash");
            conditions
        }
        None => Vec::new(),
    };

    let build_options = BuildOptions {
        placeholder_dictionary_href: args.dictionary_href.clone(),
        placeholder_dictionary_version: args.dictionary_version.clone(),
        ..BuildOptions::default()
    };
    let (document, report) =
        build_document_with_conditions(&input, &build_options, preloaded)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.dds_file.with_extension("xml"));
    let xml_options = DefineXmlOptions {
        context: args.context.clone(),
        ..DefineXmlOptions::default()
    };
    write_define_xml(&output_path, &document, &xml_options)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), "wrote Define-XML");

    let validation = match (args.validate, &args.schema) {
        (true, Some(schema)) => match validate_with_xmllint(&output_path, schema) {
            Ok(outcome) => {
                if outcome.passed {
                    info!("Define-XML file is schema valid");
                } else {
                    warn!(findings = outcome.messages.len(), "schema validation failed");
                }
                Some(outcome)
            }
            Err(error) => {
                // Validation is a non-blocking post-step; the document is
                // already on disk.
                warn!("schema validation could not run: {error:#}");
                None
            }
        },
        _ => None,
    };

    Ok(GenerateResult {
        study_name: document.study.study_name.clone(),
        output_path,
        entity_counts: entity_counts(&document),
        skipped_sections: report.skipped_sections,
        validation,
    })
}

pub fn run_conditions(args: &ConditionsArgs) -> Result<()> {
    let input = load_dds(&args.dds_file)?;
    let conditions = collect_conditions(&input)?;
    write_stash(&args.output, &conditions)?;
    info!(
        count = conditions.len(),
        path = %args.output.display(),
        "wrote condition stash"
    );
    Ok(())
}

fn entity_counts(document: &DefineDocument) -> Vec<(&'static str, usize)> {
    vec![
        ("Standard", document.standards.len()),
        ("AnnotatedCRF", document.annotated_crfs.len()),
        ("ValueListDef", document.value_lists.len()),
        ("WhereClauseDef", document.where_clauses.len()),
        ("ItemGroupDef", document.item_groups.len()),
        ("ItemDef", document.item_defs.len()),
        ("CodeList", document.code_lists.len()),
        ("MethodDef", document.methods.len()),
        ("CommentDef", document.comments.len()),
        ("leaf", document.leaves.len()),
    ]
}
