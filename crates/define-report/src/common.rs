//! Shared constants and writer helpers for Define-XML output.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use define_model::{Description, DocumentRef, TranslatedText};

/// ODM namespace.
pub const ODM_NS: &str = "http://www.cdisc.org/ns/odm/v1.3";

/// Define-XML namespace.
pub const DEFINE_XML_NS: &str = "http://www.cdisc.org/ns/def/v2.1";

/// XLink namespace.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Define-XML version.
pub const DEFINE_XML_VERSION: &str = "2.1";

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write one TranslatedText element with its language tag.
pub fn write_translated_text<W: Write>(
    writer: &mut Writer<W>,
    text: &TranslatedText,
) -> Result<()> {
    let mut translated = BytesStart::new("TranslatedText");
    translated.push_attribute(("xml:lang", text.lang.as_str()));
    writer.write_event(Event::Start(translated))?;
    writer.write_event(Event::Text(BytesText::new(&text.text)))?;
    writer.write_event(Event::End(BytesEnd::new("TranslatedText")))?;
    Ok(())
}

/// Write a wrapper element holding TranslatedText children (Description,
/// Decode).
pub fn write_description_as<W: Write>(
    writer: &mut Writer<W>,
    wrapper: &str,
    description: &Description,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(wrapper)))?;
    for text in &description.translated_text {
        write_translated_text(writer, text)?;
    }
    writer.write_event(Event::End(BytesEnd::new(wrapper)))?;
    Ok(())
}

/// Write a `def:DocumentRef`, inlining its page references.
pub fn write_document_ref<W: Write>(writer: &mut Writer<W>, document: &DocumentRef) -> Result<()> {
    let mut node = BytesStart::new("def:DocumentRef");
    node.push_attribute(("leafID", document.leaf_id.as_str()));
    if document.page_refs.is_empty() {
        writer.write_event(Event::Empty(node))?;
        return Ok(());
    }
    writer.write_event(Event::Start(node))?;
    for page in &document.page_refs {
        let mut page_node = BytesStart::new("def:PDFPageRef");
        page_node.push_attribute(("PageRefs", page.page_refs.as_str()));
        page_node.push_attribute(("Type", page.ref_type.as_str()));
        writer.write_event(Event::Empty(page_node))?;
    }
    writer.write_event(Event::End(BytesEnd::new("def:DocumentRef")))?;
    Ok(())
}
