//! Typed input schema for the DDS JSON document.
//!
//! Each struct mirrors one entry shape of the current (camelCase) DDS
//! generation. Fields whose absence must be reported with entity context are
//! `Option`s; the builders validate them in one place rather than probing
//! loosely-typed maps. Unknown keys are ignored by serde, matching the
//! pass-through policy for unrecognized input.

use std::fmt;

use serde::Deserialize;

/// A value that may arrive as either a JSON string or number (versions and
/// ordinals in real DDS files use both).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexString {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for FlexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexString::Text(value) => f.write_str(value),
            FlexString::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Top-level study metadata, read from the root object before any list
/// section is dispatched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyHeader {
    #[serde(rename = "studyOID")]
    pub study_oid: Option<String>,
    pub study_name: Option<String>,
    pub study_description: Option<String>,
    pub protocol_name: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "annotatedCRF", default)]
    pub annotated_crf: Vec<DocumentEntry>,
}

/// An annotated-CRF or supporting-document entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "leafID")]
    pub leaf_id: Option<String>,
    pub href: Option<String>,
    pub title: Option<String>,
}

/// One dataset (item group) entry with its nested variables and optional
/// value-level slices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub structure: Option<String>,
    #[serde(rename = "archiveLocationID")]
    pub archive_location_id: Option<String>,
    pub sas_dataset_name: Option<String>,
    pub is_reference_data: Option<String>,
    pub repeating: Option<bool>,
    pub purpose: Option<String>,
    pub comment: Option<String>,
    pub is_non_standard: Option<String>,
    pub was_derived_from: Option<String>,
    pub has_no_data: Option<String>,
    pub class: Option<String>,
    #[serde(default)]
    pub items: Vec<VariableEntry>,
    #[serde(default)]
    pub slices: Vec<SliceEntry>,
}

/// The two supported codelist-reference shapes: the current generation uses
/// a dotted reference string (`"CL.SEX"`), the earlier one a list of short
/// names where only the first entry is meaningful.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CodeListRefShape {
    Reference(String),
    Names(Vec<String>),
}

/// The two supported value-list-reference shapes: a participation flag (the
/// value-list OID is then derived from dataset and variable name) or an
/// explicit OID.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueListRefShape {
    Flag(bool),
    Oid(String),
}

/// Variable origin metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginEntry {
    #[serde(rename = "type")]
    pub origin_type: Option<String>,
    pub source: Option<String>,
}

/// One variable entry, used both for dataset items and for value-level
/// redefinition items.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub description: Option<String>,
    pub length: Option<u32>,
    pub significant_digits: Option<u32>,
    pub format: Option<String>,
    pub display_format: Option<String>,
    pub comment: Option<String>,
    pub code_list: Option<CodeListRefShape>,
    pub origin: Option<OriginEntry>,
    pub predecessor: Option<String>,
    pub pages: Option<FlexString>,
    pub value_list: Option<ValueListRefShape>,
    pub mandatory: Option<bool>,
    pub method: Option<String>,
    pub order: Option<u32>,
    pub key_sequence: Option<u32>,
    pub role: Option<String>,
    pub is_non_standard: Option<String>,
    pub has_no_data: Option<String>,
    #[serde(default)]
    pub applicable_when: Vec<String>,
}

/// A value-level slice nested under a dataset entry. The `type` tag
/// discriminates value-list slices from any future specialization kinds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    #[serde(rename = "type")]
    pub slice_type: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<VariableEntry>,
}

/// One coded term within a codelist entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermEntry {
    pub coded_value: Option<String>,
    pub order: Option<u32>,
    pub decode: Option<String>,
    pub nci_term_code: Option<String>,
}

/// One codelist entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeListEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub data_type: Option<String>,
    pub comment: Option<String>,
    pub is_non_standard: Option<String>,
    #[serde(rename = "standardOID")]
    pub standard_oid: Option<String>,
    pub nci_codelist_code: Option<String>,
    #[serde(default)]
    pub code_list_items: Vec<TermEntry>,
}

/// One range-check clause within a condition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCheckEntry {
    pub item: Option<String>,
    pub comparator: Option<String>,
    #[serde(default)]
    pub check_values: Vec<String>,
}

/// One named, reusable condition referenced by where-clauses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    #[serde(default)]
    pub range_checks: Vec<RangeCheckEntry>,
}

/// One where-clause entry listing the condition OIDs it inlines.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereClauseEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// One standards entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub standard_type: Option<String>,
    pub version: Option<FlexString>,
    pub status: Option<String>,
    pub publishing_set: Option<String>,
    pub comment: Option<String>,
}

/// One computation-method entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub description: Option<String>,
    pub context: Option<String>,
    pub code: Option<String>,
    pub document: Option<String>,
    pub pages: Option<FlexString>,
}

/// One comment entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    #[serde(rename = "OID")]
    pub oid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub document: Option<String>,
    pub pages: Option<FlexString>,
}

/// One external-dictionary entry (also the shape of concept-property
/// entries).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub short_name: Option<String>,
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub dictionary: Option<String>,
    pub version: Option<FlexString>,
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_header_reads_renamed_keys() {
        let json = r#"{
            "studyOID": "ST.360i",
            "studyName": "360i",
            "language": "en",
            "annotatedCRF": [{"leafID": "LF.acrf", "href": "acrf.pdf", "title": "Annotated CRF"}],
            "itemGroups": []
        }"#;
        let header: StudyHeader = serde_json::from_str(json).unwrap();
        assert_eq!(header.study_oid.as_deref(), Some("ST.360i"));
        assert_eq!(header.annotated_crf[0].leaf_id.as_deref(), Some("LF.acrf"));
        assert!(header.study_description.is_none());
    }

    #[test]
    fn code_list_ref_accepts_both_shapes() {
        let dotted: CodeListRefShape = serde_json::from_str(r#""CL.SEX""#).unwrap();
        assert!(matches!(dotted, CodeListRefShape::Reference(ref s) if s == "CL.SEX"));
        let listed: CodeListRefShape = serde_json::from_str(r#"["SEX", "GENDER"]"#).unwrap();
        assert!(matches!(listed, CodeListRefShape::Names(ref v) if v.len() == 2));
    }

    #[test]
    fn value_list_ref_accepts_flag_and_oid() {
        let flag: ValueListRefShape = serde_json::from_str("true").unwrap();
        assert!(matches!(flag, ValueListRefShape::Flag(true)));
        let oid: ValueListRefShape = serde_json::from_str(r#""VL.VS.VSORRES""#).unwrap();
        assert!(matches!(oid, ValueListRefShape::Oid(ref s) if s == "VL.VS.VSORRES"));
    }

    #[test]
    fn variable_entry_reads_value_level_shape() {
        let json = r#"{
            "OID": "IT.VS.VSORRES.TEMP",
            "mandatory": false,
            "name": "VSORRES",
            "dataType": "float",
            "applicableWhen": ["WC.VS.df8e6ed8"],
            "displayFormat": "8.3",
            "significantDigits": 3,
            "origin": {"type": "Collected", "source": "Investigator"}
        }"#;
        let entry: VariableEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.oid.as_deref(), Some("IT.VS.VSORRES.TEMP"));
        assert_eq!(entry.mandatory, Some(false));
        assert_eq!(entry.applicable_when, vec!["WC.VS.df8e6ed8"]);
        assert_eq!(
            entry.origin.as_ref().unwrap().origin_type.as_deref(),
            Some("Collected")
        );
    }

    #[test]
    fn flex_string_renders_numbers() {
        let version: FlexString = serde_json::from_str("3.4").unwrap();
        assert_eq!(version.to_string(), "3.4");
        let text: FlexString = serde_json::from_str(r#""2025-03-24""#).unwrap();
        assert_eq!(text.to_string(), "2025-03-24");
    }
}
