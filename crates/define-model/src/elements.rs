//! Define-XML v2.1 element model.
//!
//! Passive data structures mirroring the output document tree. Builders
//! populate these from DDS input; the report crate walks them to emit XML.
//! Element and attribute names follow the Define-XML v2.1 schema; fields the
//! schema marks optional are `Option`s here.

/// Yes/No attribute value used by `Repeating`, `IsReferenceData`, and
/// `Mandatory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

/// A single language-tagged text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub text: String,
    pub lang: String,
}

/// Description wrapper holding one or more TranslatedText children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub translated_text: Vec<TranslatedText>,
}

impl Description {
    /// Single-language description, the only shape the DDS input produces.
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            translated_text: vec![TranslatedText {
                text: text.into(),
                lang: lang.into(),
            }],
        }
    }
}

/// External cross-reference alias (`Context="nci:ExtCodeID"` for NCI codes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub context: String,
    pub name: String,
}

/// Page reference into a PDF leaf document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPageRef {
    pub page_refs: String,
    pub ref_type: String,
}

/// Reference to a leaf document, optionally scoped to page ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub leaf_id: String,
    pub page_refs: Vec<PdfPageRef>,
}

impl DocumentRef {
    pub fn new(leaf_id: impl Into<String>) -> Self {
        Self {
            leaf_id: leaf_id.into(),
            page_refs: Vec::new(),
        }
    }
}

/// `def:leaf` — a physical document referenced from the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub id: String,
    pub href: String,
    pub title: String,
}

/// `def:AnnotatedCRF` wrapper pointing at the annotated CRF leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedCrf {
    pub document_ref: DocumentRef,
}

/// Study singleton with its global variables.
#[derive(Debug, Clone)]
pub struct Study {
    pub oid: String,
    pub study_name: String,
    pub study_description: String,
    pub protocol_name: String,
}

/// MetaDataVersion singleton.
#[derive(Debug, Clone)]
pub struct MetaDataVersion {
    pub oid: String,
    pub name: String,
    pub description: String,
    pub define_version: String,
}

/// `def:Standard` entry.
#[derive(Debug, Clone)]
pub struct Standard {
    pub oid: String,
    pub name: String,
    pub standard_type: String,
    pub version: String,
    pub status: String,
    pub publishing_set: Option<String>,
    pub comment_oid: Option<String>,
}

/// ItemRef joining a dataset or value list to an ItemDef.
#[derive(Debug, Clone)]
pub struct ItemRef {
    pub item_oid: String,
    pub mandatory: YesNo,
    pub order_number: Option<u32>,
    pub key_sequence: Option<u32>,
    pub method_oid: Option<String>,
    pub role: Option<String>,
    pub is_non_standard: Option<String>,
    pub has_no_data: Option<String>,
    /// WhereClauseRef OIDs; populated only for value-level ItemRefs.
    pub where_clause_refs: Vec<String>,
}

impl ItemRef {
    pub fn new(item_oid: impl Into<String>, mandatory: YesNo) -> Self {
        Self {
            item_oid: item_oid.into(),
            mandatory,
            order_number: None,
            key_sequence: None,
            method_oid: None,
            role: None,
            is_non_standard: None,
            has_no_data: None,
            where_clause_refs: Vec::new(),
        }
    }
}

/// ItemGroupDef — one dataset.
#[derive(Debug, Clone)]
pub struct ItemGroupDef {
    pub oid: String,
    pub name: String,
    pub domain: String,
    pub repeating: YesNo,
    pub is_reference_data: YesNo,
    pub purpose: String,
    pub structure: String,
    pub sas_dataset_name: Option<String>,
    pub archive_location_id: Option<String>,
    pub comment_oid: Option<String>,
    pub is_non_standard: Option<String>,
    pub standard_oid: Option<String>,
    pub has_no_data: Option<String>,
    pub description: Description,
    pub item_refs: Vec<ItemRef>,
    /// `def:Class` name; one class per dataset.
    pub class: Option<String>,
}

/// Variable origin (`def:Origin`), with optional predecessor description and
/// CRF page references.
#[derive(Debug, Clone)]
pub struct Origin {
    pub origin_type: String,
    pub source: Option<String>,
    pub description: Option<Description>,
    pub document_refs: Vec<DocumentRef>,
}

/// ItemDef — one variable or value-level redefinition.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub oid: String,
    pub name: String,
    pub data_type: String,
    pub sas_field_name: String,
    pub length: Option<u32>,
    pub significant_digits: Option<u32>,
    pub display_format: Option<String>,
    pub comment_oid: Option<String>,
    pub description: Option<Description>,
    pub codelist_ref: Option<String>,
    pub origins: Vec<Origin>,
    pub value_list_ref: Option<String>,
}

/// Coded term with a decode.
#[derive(Debug, Clone)]
pub struct CodeListItem {
    pub coded_value: String,
    pub order_number: Option<u32>,
    pub decode: TranslatedText,
    pub alias: Option<Alias>,
}

/// Coded term without a decode.
#[derive(Debug, Clone)]
pub struct EnumeratedItem {
    pub coded_value: String,
    pub order_number: Option<u32>,
    pub alias: Option<Alias>,
}

/// Reference to an external dictionary in place of local terms.
#[derive(Debug, Clone)]
pub struct ExternalCodeList {
    pub dictionary: String,
    pub version: Option<String>,
    pub href: Option<String>,
}

/// The three mutually exclusive codelist bodies.
#[derive(Debug, Clone)]
pub enum CodeListTerms {
    Decoded(Vec<CodeListItem>),
    Enumerated(Vec<EnumeratedItem>),
    External(ExternalCodeList),
}

/// CodeList — enumerated or external-dictionary value domain.
#[derive(Debug, Clone)]
pub struct CodeList {
    pub oid: String,
    pub name: String,
    pub data_type: String,
    pub comment_oid: Option<String>,
    pub is_non_standard: Option<String>,
    pub standard_oid: Option<String>,
    pub terms: CodeListTerms,
    pub aliases: Vec<Alias>,
}

/// RangeCheck inlined into a WhereClauseDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCheck {
    pub soft_hard: String,
    pub item_oid: String,
    pub comparator: String,
    pub check_values: Vec<String>,
}

/// `def:WhereClauseDef` — a conditional predicate.
#[derive(Debug, Clone)]
pub struct WhereClauseDef {
    pub oid: String,
    pub range_checks: Vec<RangeCheck>,
}

/// `def:ValueListDef` — container of conditional variable redefinitions.
#[derive(Debug, Clone)]
pub struct ValueListDef {
    pub oid: String,
    pub item_refs: Vec<ItemRef>,
}

/// Formal expression attached to a computation method.
#[derive(Debug, Clone)]
pub struct FormalExpression {
    pub context: String,
    pub code: String,
}

/// MethodDef — a derivation or computation method.
#[derive(Debug, Clone)]
pub struct MethodDef {
    pub oid: String,
    pub name: String,
    pub method_type: String,
    pub description: Description,
    pub formal_expression: Option<FormalExpression>,
    pub document_refs: Vec<DocumentRef>,
}

/// `def:CommentDef`.
#[derive(Debug, Clone)]
pub struct CommentDef {
    pub oid: String,
    pub description: Description,
    pub document_refs: Vec<DocumentRef>,
}

/// The fully assembled document, ready for serialization.
///
/// Collections appear here in the schema-mandated MetaDataVersion child
/// order; the writer emits them exactly as stored.
#[derive(Debug, Clone)]
pub struct DefineDocument {
    pub study: Study,
    pub metadata_version: MetaDataVersion,
    pub standards: Vec<Standard>,
    pub annotated_crfs: Vec<AnnotatedCrf>,
    pub value_lists: Vec<ValueListDef>,
    pub where_clauses: Vec<WhereClauseDef>,
    pub item_groups: Vec<ItemGroupDef>,
    pub item_defs: Vec<ItemDef>,
    pub code_lists: Vec<CodeList>,
    pub methods: Vec<MethodDef>,
    pub comments: Vec<CommentDef>,
    pub leaves: Vec<Leaf>,
}
