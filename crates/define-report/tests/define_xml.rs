//! Serialization tests over a fully built document.

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use define_build::{BuildOptions, build_document};
use define_report::{DefineXmlOptions, write_define_xml};

fn sample_xml() -> String {
    let input = json!({
        "studyOID": "ST.360i",
        "studyName": "360i",
        "studyDescription": "360i pilot study",
        "protocolName": "360i-P1",
        "standards": [
            {"name": "SDTMIG", "type": "IG", "version": "3.4"}
        ],
        "itemGroups": [
            {
                "name": "DM",
                "description": "Demographics",
                "structure": "One record per subject",
                "class": "special-purpose",
                "items": [
                    {"name": "USUBJID", "dataType": "text", "mandatory": true, "order": 1,
                     "role": "Identifier", "keySequence": 1},
                    {"name": "SEX", "dataType": "text", "codeList": "CL.SEX", "order": 2}
                ]
            },
            {
                "name": "VS",
                "description": "Vital Signs",
                "structure": "One record per subject per visit per test",
                "items": [
                    {"name": "VSORRES", "dataType": "text", "valueList": true,
                     "origin": {"type": "Collected", "source": "Investigator"}, "pages": "33"}
                ],
                "slices": [
                    {
                        "OID": "VL.VS.VSORRES",
                        "type": "ValueList",
                        "items": [
                            {"OID": "IT.VS.VSORRES.TEMP", "name": "VSORRES", "dataType": "float",
                             "applicableWhen": ["WC.VS.TEMP"], "significantDigits": 3,
                             "displayFormat": "8.3"}
                        ]
                    }
                ]
            }
        ],
        "codeLists": [
            {"OID": "CL.SEX", "name": "Sex",
             "codeListItems": [{"codedValue": "M", "decode": "Male"}, {"codedValue": "F"}]},
            {"OID": "CL.MEDDRA", "name": "MedDRA", "codeListItems": []}
        ],
        "conditions": [
            {"OID": "COND.VS.TEMP", "rangeChecks": [
                {"item": "IT.VS.VSTESTCD", "comparator": "EQ", "checkValues": ["TEMP"]}
            ]}
        ],
        "whereClauses": [{"OID": "WC.VS.TEMP", "conditions": ["COND.VS.TEMP"]}],
        "methods": [
            {"OID": "MT.DM.AGE", "name": "Age", "type": "Computation", "description": "Derived age"}
        ],
        "comments": [{"OID": "COM.DM", "description": "Screen failures excluded"}]
    });
    let (document, _) = build_document(&input, &BuildOptions::default()).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("define.xml");
    write_define_xml(&path, &document, &DefineXmlOptions::default()).unwrap();
    fs::read_to_string(&path).unwrap()
}

#[test]
fn root_carries_namespaces_and_file_oid() {
    let xml = sample_xml();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(r#"xmlns="http://www.cdisc.org/ns/odm/v1.3""#));
    assert!(xml.contains(r#"xmlns:def="http://www.cdisc.org/ns/def/v2.1""#));
    assert!(xml.contains(r#"FileOID="ST.360i.Define-XML_2.1""#));
    assert!(xml.contains(r#"def:Context="Submission""#));
    assert!(xml.contains(r#"def:DefineVersion="2.1.0""#));
}

#[test]
fn metadata_children_appear_in_schema_order() {
    let xml = sample_xml();
    let positions: Vec<usize> = [
        "<def:Standards>",
        "<def:AnnotatedCRF>",
        "<def:ValueListDef ",
        "<def:WhereClauseDef ",
        "<ItemGroupDef ",
        "<ItemDef ",
        "<CodeList ",
        "<MethodDef ",
        "<def:CommentDef ",
        "<def:leaf ",
    ]
    .iter()
    .map(|needle| xml.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "element families out of schema order");
}

#[test]
fn item_group_attributes_and_class_placement() {
    let xml = sample_xml();
    assert!(xml.contains(
        r#"<ItemGroupDef OID="IG.DM" Name="DM" Domain="DM" Repeating="No" IsReferenceData="No" Purpose="Tabulation" def:Structure="One record per subject">"#
    ));
    // def:Class comes after the ItemRefs, just before the group closes.
    let group_end = xml.find("</ItemGroupDef>").unwrap();
    let class_pos = xml.find(r#"<def:Class Name="SPECIAL PURPOSE"/>"#).unwrap();
    let last_item_ref = xml[..group_end].rfind("<ItemRef ").unwrap();
    assert!(class_pos > last_item_ref);
    assert!(class_pos < group_end);
}

#[test]
fn item_refs_carry_order_and_keys() {
    let xml = sample_xml();
    assert!(xml.contains(
        r#"<ItemRef ItemOID="IT.DM.USUBJID" OrderNumber="1" Mandatory="Yes" KeySequence="1" Role="Identifier"/>"#
    ));
}

#[test]
fn decode_fallback_appears_in_output() {
    let xml = sample_xml();
    assert!(xml.contains(r#"<CodeListItem CodedValue="M">"#));
    assert!(xml.contains(">Male</TranslatedText>"));
    // The decode-less "F" term falls back to its coded value.
    let f_item = xml.find(r#"<CodeListItem CodedValue="F">"#).unwrap();
    let f_decode = &xml[f_item..xml[f_item..].find("</CodeListItem>").unwrap() + f_item];
    assert!(f_decode.contains(">F</TranslatedText>"));
}

#[test]
fn external_codelist_has_no_local_terms() {
    let xml = sample_xml();
    let start = xml.find(r#"<CodeList OID="CL.MEDDRA""#).unwrap();
    let body = &xml[start..xml[start..].find("</CodeList>").unwrap() + start];
    assert!(body.contains(r#"<ExternalCodeList Dictionary="MedDRA" Version="1.0" href="https://www.iso.org"/>"#));
    assert!(!body.contains("<CodeListItem"));
    assert!(!body.contains("<EnumeratedItem"));
}

#[test]
fn where_clause_inlines_range_checks() {
    let xml = sample_xml();
    assert!(xml.contains(r#"<def:WhereClauseDef OID="WC.VS.TEMP">"#));
    assert!(xml.contains(
        r#"<RangeCheck SoftHard="Soft" def:ItemOID="IT.VS.VSTESTCD" Comparator="EQ">"#
    ));
    assert!(xml.contains("<CheckValue>TEMP</CheckValue>"));
}

#[test]
fn value_list_item_ref_carries_where_clause_ref() {
    let xml = sample_xml();
    let start = xml.find(r#"<def:ValueListDef OID="VL.VS.VSORRES">"#).unwrap();
    let body = &xml[start..xml[start..].find("</def:ValueListDef>").unwrap() + start];
    assert!(body.contains(r#"ItemOID="IT.VS.VSORRES.TEMP""#));
    assert!(body.contains(r#"<def:WhereClauseRef WhereClauseOID="WC.VS.TEMP"/>"#));
}

#[test]
fn origin_pages_reference_the_acrf_leaf() {
    let xml = sample_xml();
    assert!(xml.contains(r#"<def:Origin Type="Collected" Source="Investigator">"#));
    assert!(xml.contains(r#"<def:DocumentRef leafID="LF.acrf">"#));
    assert!(xml.contains(r#"<def:PDFPageRef PageRefs="33" Type="PhysicalRef"/>"#));
    assert!(xml.contains(r#"<def:leaf ID="LF.acrf" xlink:href="acrf.pdf">"#));
    assert!(xml.contains("<def:title>Annotated CRF</def:title>"));
}

#[test]
fn output_is_deterministic_apart_from_timestamp() {
    let strip_timestamp = |xml: &str| -> String {
        let start = xml.find("CreationDateTime=\"").unwrap();
        let end = start + xml[start + 18..].find('"').unwrap() + 19;
        format!("{}{}", &xml[..start], &xml[end..])
    };
    let first = strip_timestamp(&sample_xml());
    let second = strip_timestamp(&sample_xml());
    assert_eq!(first, second);
}
