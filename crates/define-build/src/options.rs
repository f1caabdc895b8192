//! Build configuration.

/// Configurable defaults applied while building the document.
///
/// The external-dictionary placeholder fields back the stand-in reference
/// synthesized for term-less codelists, pending real dictionary metadata in
/// the input schema.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Language applied to every TranslatedText unless the input overrides it.
    pub language: String,
    /// Leaf ID of the annotated CRF when the input names none.
    pub acrf_leaf_id: String,
    /// Href of the synthesized annotated-CRF leaf.
    pub acrf_href: String,
    /// Title of the synthesized annotated-CRF leaf.
    pub acrf_title: String,
    /// Version recorded on synthesized external-dictionary references.
    pub placeholder_dictionary_version: String,
    /// Authority URL recorded on synthesized external-dictionary references.
    pub placeholder_dictionary_href: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            acrf_leaf_id: "LF.acrf".to_string(),
            acrf_href: "acrf.pdf".to_string(),
            acrf_title: "Annotated CRF".to_string(),
            placeholder_dictionary_version: "1.0".to_string(),
            placeholder_dictionary_href: "https://www.iso.org".to_string(),
        }
    }
}
