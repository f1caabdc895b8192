//! Define-XML output generation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use define_model::{
    CodeList, CodeListTerms, CommentDef, DefineDocument, ItemDef, ItemGroupDef, ItemRef, Leaf,
    MethodDef, Standard, ValueListDef, WhereClauseDef,
};

use crate::common::{
    DEFINE_XML_NS, DEFINE_XML_VERSION, ODM_NS, XLINK_NS, write_description_as, write_document_ref,
    write_text_element, write_translated_text,
};

/// Options for Define-XML output.
#[derive(Debug, Clone)]
pub struct DefineXmlOptions {
    /// Value of the `def:Context` root attribute.
    pub context: String,
    /// Originator/SourceSystem identification in the ODM root.
    pub originator: String,
}

impl Default for DefineXmlOptions {
    fn default() -> Self {
        Self {
            context: "Submission".to_string(),
            originator: "dds2define".to_string(),
        }
    }
}

/// Serialize the assembled document to a Define-XML v2.1 file.
///
/// Element order within MetaDataVersion is fixed by the schema and mirrors
/// the collection order of [`DefineDocument`].
pub fn write_define_xml(
    output_path: &Path,
    document: &DefineDocument,
    options: &DefineXmlOptions,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let file = File::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    let writer = BufWriter::new(file);
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    write_document(&mut xml, document, options)?;
    Ok(())
}

fn write_document<W: Write>(
    xml: &mut Writer<W>,
    document: &DefineDocument,
    options: &DefineXmlOptions,
) -> Result<()> {
    let file_oid = format!("{}.Define-XML_{DEFINE_XML_VERSION}", document.study.oid);
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("ODM");
    root.push_attribute(("xmlns", ODM_NS));
    root.push_attribute(("xmlns:def", DEFINE_XML_NS));
    root.push_attribute(("xmlns:xlink", XLINK_NS));
    root.push_attribute(("FileType", "Snapshot"));
    root.push_attribute(("FileOID", file_oid.as_str()));
    root.push_attribute(("ODMVersion", "1.3.2"));
    root.push_attribute(("CreationDateTime", timestamp.as_str()));
    root.push_attribute(("Originator", options.originator.as_str()));
    root.push_attribute(("SourceSystem", options.originator.as_str()));
    root.push_attribute(("SourceSystemVersion", env!("CARGO_PKG_VERSION")));
    root.push_attribute(("def:Context", options.context.as_str()));
    xml.write_event(Event::Start(root))?;

    let mut study = BytesStart::new("Study");
    study.push_attribute(("OID", document.study.oid.as_str()));
    xml.write_event(Event::Start(study))?;

    xml.write_event(Event::Start(BytesStart::new("GlobalVariables")))?;
    write_text_element(xml, "StudyName", &document.study.study_name)?;
    write_text_element(xml, "StudyDescription", &document.study.study_description)?;
    write_text_element(xml, "ProtocolName", &document.study.protocol_name)?;
    xml.write_event(Event::End(BytesEnd::new("GlobalVariables")))?;

    let mdv = &document.metadata_version;
    let mut metadata = BytesStart::new("MetaDataVersion");
    metadata.push_attribute(("OID", mdv.oid.as_str()));
    metadata.push_attribute(("Name", mdv.name.as_str()));
    metadata.push_attribute(("Description", mdv.description.as_str()));
    metadata.push_attribute(("def:DefineVersion", mdv.define_version.as_str()));
    xml.write_event(Event::Start(metadata))?;

    if !document.standards.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("def:Standards")))?;
        for standard in &document.standards {
            write_standard(xml, standard)?;
        }
        xml.write_event(Event::End(BytesEnd::new("def:Standards")))?;
    }

    for acrf in &document.annotated_crfs {
        xml.write_event(Event::Start(BytesStart::new("def:AnnotatedCRF")))?;
        write_document_ref(xml, &acrf.document_ref)?;
        xml.write_event(Event::End(BytesEnd::new("def:AnnotatedCRF")))?;
    }

    for value_list in &document.value_lists {
        write_value_list(xml, value_list)?;
    }
    for where_clause in &document.where_clauses {
        write_where_clause(xml, where_clause)?;
    }
    for group in &document.item_groups {
        write_item_group(xml, group)?;
    }
    for item in &document.item_defs {
        write_item_def(xml, item)?;
    }
    for code_list in &document.code_lists {
        write_code_list(xml, code_list)?;
    }
    for method in &document.methods {
        write_method(xml, method)?;
    }
    for comment in &document.comments {
        write_comment(xml, comment)?;
    }
    for leaf in &document.leaves {
        write_leaf(xml, leaf)?;
    }

    xml.write_event(Event::End(BytesEnd::new("MetaDataVersion")))?;
    xml.write_event(Event::End(BytesEnd::new("Study")))?;
    xml.write_event(Event::End(BytesEnd::new("ODM")))?;
    Ok(())
}

fn write_standard<W: Write>(xml: &mut Writer<W>, standard: &Standard) -> Result<()> {
    let mut node = BytesStart::new("def:Standard");
    node.push_attribute(("OID", standard.oid.as_str()));
    node.push_attribute(("Name", standard.name.as_str()));
    node.push_attribute(("Type", standard.standard_type.as_str()));
    if let Some(publishing_set) = &standard.publishing_set {
        node.push_attribute(("PublishingSet", publishing_set.as_str()));
    }
    node.push_attribute(("Version", standard.version.as_str()));
    node.push_attribute(("Status", standard.status.as_str()));
    if let Some(comment_oid) = &standard.comment_oid {
        node.push_attribute(("def:CommentOID", comment_oid.as_str()));
    }
    xml.write_event(Event::Empty(node))?;
    Ok(())
}

fn write_value_list<W: Write>(xml: &mut Writer<W>, value_list: &ValueListDef) -> Result<()> {
    let mut node = BytesStart::new("def:ValueListDef");
    node.push_attribute(("OID", value_list.oid.as_str()));
    xml.write_event(Event::Start(node))?;
    for item_ref in &value_list.item_refs {
        write_item_ref(xml, item_ref)?;
    }
    xml.write_event(Event::End(BytesEnd::new("def:ValueListDef")))?;
    Ok(())
}

fn write_where_clause<W: Write>(xml: &mut Writer<W>, where_clause: &WhereClauseDef) -> Result<()> {
    let mut node = BytesStart::new("def:WhereClauseDef");
    node.push_attribute(("OID", where_clause.oid.as_str()));
    xml.write_event(Event::Start(node))?;
    for check in &where_clause.range_checks {
        let mut check_node = BytesStart::new("RangeCheck");
        check_node.push_attribute(("SoftHard", check.soft_hard.as_str()));
        check_node.push_attribute(("def:ItemOID", check.item_oid.as_str()));
        check_node.push_attribute(("Comparator", check.comparator.as_str()));
        xml.write_event(Event::Start(check_node))?;
        for value in &check.check_values {
            write_text_element(xml, "CheckValue", value)?;
        }
        xml.write_event(Event::End(BytesEnd::new("RangeCheck")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("def:WhereClauseDef")))?;
    Ok(())
}

fn write_item_ref<W: Write>(xml: &mut Writer<W>, item_ref: &ItemRef) -> Result<()> {
    let mut node = BytesStart::new("ItemRef");
    node.push_attribute(("ItemOID", item_ref.item_oid.as_str()));
    if let Some(order) = item_ref.order_number {
        node.push_attribute(("OrderNumber", order.to_string().as_str()));
    }
    node.push_attribute(("Mandatory", item_ref.mandatory.as_str()));
    if let Some(key_sequence) = item_ref.key_sequence {
        node.push_attribute(("KeySequence", key_sequence.to_string().as_str()));
    }
    if let Some(method_oid) = &item_ref.method_oid {
        node.push_attribute(("MethodOID", method_oid.as_str()));
    }
    if let Some(role) = &item_ref.role {
        node.push_attribute(("Role", role.as_str()));
    }
    if let Some(is_non_standard) = &item_ref.is_non_standard {
        node.push_attribute(("def:IsNonStandard", is_non_standard.as_str()));
    }
    if let Some(has_no_data) = &item_ref.has_no_data {
        node.push_attribute(("def:HasNoData", has_no_data.as_str()));
    }
    if item_ref.where_clause_refs.is_empty() {
        xml.write_event(Event::Empty(node))?;
        return Ok(());
    }
    xml.write_event(Event::Start(node))?;
    for where_clause_oid in &item_ref.where_clause_refs {
        let mut wc_node = BytesStart::new("def:WhereClauseRef");
        wc_node.push_attribute(("WhereClauseOID", where_clause_oid.as_str()));
        xml.write_event(Event::Empty(wc_node))?;
    }
    xml.write_event(Event::End(BytesEnd::new("ItemRef")))?;
    Ok(())
}

fn write_item_group<W: Write>(xml: &mut Writer<W>, group: &ItemGroupDef) -> Result<()> {
    let mut node = BytesStart::new("ItemGroupDef");
    node.push_attribute(("OID", group.oid.as_str()));
    node.push_attribute(("Name", group.name.as_str()));
    node.push_attribute(("Domain", group.domain.as_str()));
    node.push_attribute(("Repeating", group.repeating.as_str()));
    node.push_attribute(("IsReferenceData", group.is_reference_data.as_str()));
    if let Some(sas_name) = &group.sas_dataset_name {
        node.push_attribute(("SASDatasetName", sas_name.as_str()));
    }
    node.push_attribute(("Purpose", group.purpose.as_str()));
    node.push_attribute(("def:Structure", group.structure.as_str()));
    if let Some(archive_location_id) = &group.archive_location_id {
        node.push_attribute(("def:ArchiveLocationID", archive_location_id.as_str()));
    }
    if let Some(comment_oid) = &group.comment_oid {
        node.push_attribute(("def:CommentOID", comment_oid.as_str()));
    }
    if let Some(is_non_standard) = &group.is_non_standard {
        node.push_attribute(("def:IsNonStandard", is_non_standard.as_str()));
    }
    if let Some(standard_oid) = &group.standard_oid {
        node.push_attribute(("def:StandardOID", standard_oid.as_str()));
    }
    if let Some(has_no_data) = &group.has_no_data {
        node.push_attribute(("def:HasNoData", has_no_data.as_str()));
    }
    xml.write_event(Event::Start(node))?;
    write_description_as(xml, "Description", &group.description)?;
    for item_ref in &group.item_refs {
        write_item_ref(xml, item_ref)?;
    }
    // def:Class must follow the ItemRefs to stay schema-legal.
    if let Some(class) = &group.class {
        let mut class_node = BytesStart::new("def:Class");
        class_node.push_attribute(("Name", class.as_str()));
        xml.write_event(Event::Empty(class_node))?;
    }
    xml.write_event(Event::End(BytesEnd::new("ItemGroupDef")))?;
    Ok(())
}

fn write_item_def<W: Write>(xml: &mut Writer<W>, item: &ItemDef) -> Result<()> {
    let mut node = BytesStart::new("ItemDef");
    node.push_attribute(("OID", item.oid.as_str()));
    node.push_attribute(("Name", item.name.as_str()));
    node.push_attribute(("DataType", item.data_type.as_str()));
    if let Some(length) = item.length {
        node.push_attribute(("Length", length.to_string().as_str()));
    }
    if let Some(digits) = item.significant_digits {
        node.push_attribute(("SignificantDigits", digits.to_string().as_str()));
    }
    node.push_attribute(("SASFieldName", item.sas_field_name.as_str()));
    if let Some(display_format) = &item.display_format {
        node.push_attribute(("def:DisplayFormat", display_format.as_str()));
    }
    if let Some(comment_oid) = &item.comment_oid {
        node.push_attribute(("def:CommentOID", comment_oid.as_str()));
    }
    xml.write_event(Event::Start(node))?;
    if let Some(description) = &item.description {
        write_description_as(xml, "Description", description)?;
    }
    if let Some(codelist_oid) = &item.codelist_ref {
        let mut ref_node = BytesStart::new("CodeListRef");
        ref_node.push_attribute(("CodeListOID", codelist_oid.as_str()));
        xml.write_event(Event::Empty(ref_node))?;
    }
    for origin in &item.origins {
        let mut origin_node = BytesStart::new("def:Origin");
        origin_node.push_attribute(("Type", origin.origin_type.as_str()));
        if let Some(source) = &origin.source {
            origin_node.push_attribute(("Source", source.as_str()));
        }
        if origin.description.is_none() && origin.document_refs.is_empty() {
            xml.write_event(Event::Empty(origin_node))?;
            continue;
        }
        xml.write_event(Event::Start(origin_node))?;
        if let Some(description) = &origin.description {
            write_description_as(xml, "Description", description)?;
        }
        for document_ref in &origin.document_refs {
            write_document_ref(xml, document_ref)?;
        }
        xml.write_event(Event::End(BytesEnd::new("def:Origin")))?;
    }
    if let Some(value_list_oid) = &item.value_list_ref {
        let mut ref_node = BytesStart::new("def:ValueListRef");
        ref_node.push_attribute(("ValueListOID", value_list_oid.as_str()));
        xml.write_event(Event::Empty(ref_node))?;
    }
    xml.write_event(Event::End(BytesEnd::new("ItemDef")))?;
    Ok(())
}

fn write_code_list<W: Write>(xml: &mut Writer<W>, code_list: &CodeList) -> Result<()> {
    let mut node = BytesStart::new("CodeList");
    node.push_attribute(("OID", code_list.oid.as_str()));
    node.push_attribute(("Name", code_list.name.as_str()));
    node.push_attribute(("DataType", code_list.data_type.as_str()));
    if let Some(standard_oid) = &code_list.standard_oid {
        node.push_attribute(("def:StandardOID", standard_oid.as_str()));
    }
    if let Some(is_non_standard) = &code_list.is_non_standard {
        node.push_attribute(("def:IsNonStandard", is_non_standard.as_str()));
    }
    if let Some(comment_oid) = &code_list.comment_oid {
        node.push_attribute(("def:CommentOID", comment_oid.as_str()));
    }
    xml.write_event(Event::Start(node))?;
    match &code_list.terms {
        CodeListTerms::Decoded(items) => {
            for item in items {
                let mut item_node = BytesStart::new("CodeListItem");
                item_node.push_attribute(("CodedValue", item.coded_value.as_str()));
                if let Some(order) = item.order_number {
                    item_node.push_attribute(("OrderNumber", order.to_string().as_str()));
                }
                xml.write_event(Event::Start(item_node))?;
                xml.write_event(Event::Start(BytesStart::new("Decode")))?;
                write_translated_text(xml, &item.decode)?;
                xml.write_event(Event::End(BytesEnd::new("Decode")))?;
                if let Some(alias) = &item.alias {
                    write_alias(xml, &alias.context, &alias.name)?;
                }
                xml.write_event(Event::End(BytesEnd::new("CodeListItem")))?;
            }
        }
        CodeListTerms::Enumerated(items) => {
            for item in items {
                let mut item_node = BytesStart::new("EnumeratedItem");
                item_node.push_attribute(("CodedValue", item.coded_value.as_str()));
                if let Some(order) = item.order_number {
                    item_node.push_attribute(("OrderNumber", order.to_string().as_str()));
                }
                match &item.alias {
                    Some(alias) => {
                        xml.write_event(Event::Start(item_node))?;
                        write_alias(xml, &alias.context, &alias.name)?;
                        xml.write_event(Event::End(BytesEnd::new("EnumeratedItem")))?;
                    }
                    None => xml.write_event(Event::Empty(item_node))?,
                }
            }
        }
        CodeListTerms::External(external) => {
            let mut external_node = BytesStart::new("ExternalCodeList");
            external_node.push_attribute(("Dictionary", external.dictionary.as_str()));
            if let Some(version) = &external.version {
                external_node.push_attribute(("Version", version.as_str()));
            }
            if let Some(href) = &external.href {
                external_node.push_attribute(("href", href.as_str()));
            }
            xml.write_event(Event::Empty(external_node))?;
        }
    }
    for alias in &code_list.aliases {
        write_alias(xml, &alias.context, &alias.name)?;
    }
    xml.write_event(Event::End(BytesEnd::new("CodeList")))?;
    Ok(())
}

fn write_alias<W: Write>(xml: &mut Writer<W>, context: &str, name: &str) -> Result<()> {
    let mut node = BytesStart::new("Alias");
    node.push_attribute(("Context", context));
    node.push_attribute(("Name", name));
    xml.write_event(Event::Empty(node))?;
    Ok(())
}

fn write_method<W: Write>(xml: &mut Writer<W>, method: &MethodDef) -> Result<()> {
    let mut node = BytesStart::new("MethodDef");
    node.push_attribute(("OID", method.oid.as_str()));
    node.push_attribute(("Name", method.name.as_str()));
    node.push_attribute(("Type", method.method_type.as_str()));
    xml.write_event(Event::Start(node))?;
    write_description_as(xml, "Description", &method.description)?;
    if let Some(expression) = &method.formal_expression {
        let mut expression_node = BytesStart::new("FormalExpression");
        expression_node.push_attribute(("Context", expression.context.as_str()));
        xml.write_event(Event::Start(expression_node))?;
        xml.write_event(Event::Text(quick_xml::events::BytesText::new(
            &expression.code,
        )))?;
        xml.write_event(Event::End(BytesEnd::new("FormalExpression")))?;
    }
    for document_ref in &method.document_refs {
        write_document_ref(xml, document_ref)?;
    }
    xml.write_event(Event::End(BytesEnd::new("MethodDef")))?;
    Ok(())
}

fn write_comment<W: Write>(xml: &mut Writer<W>, comment: &CommentDef) -> Result<()> {
    let mut node = BytesStart::new("def:CommentDef");
    node.push_attribute(("OID", comment.oid.as_str()));
    xml.write_event(Event::Start(node))?;
    write_description_as(xml, "Description", &comment.description)?;
    for document_ref in &comment.document_refs {
        write_document_ref(xml, document_ref)?;
    }
    xml.write_event(Event::End(BytesEnd::new("def:CommentDef")))?;
    Ok(())
}

fn write_leaf<W: Write>(xml: &mut Writer<W>, leaf: &Leaf) -> Result<()> {
    let mut node = BytesStart::new("def:leaf");
    node.push_attribute(("ID", leaf.id.as_str()));
    node.push_attribute(("xlink:href", leaf.href.as_str()));
    xml.write_event(Event::Start(node))?;
    write_text_element(xml, "def:title", &leaf.title)?;
    xml.write_event(Event::End(BytesEnd::new("def:leaf")))?;
    Ok(())
}
