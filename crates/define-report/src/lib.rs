pub mod common;
pub mod define_xml;
pub mod validate;

pub use common::{DEFINE_XML_NS, DEFINE_XML_VERSION, ODM_NS, XLINK_NS};
pub use define_xml::{DefineXmlOptions, write_define_xml};
pub use validate::{ValidationOutcome, validate_with_xmllint};
