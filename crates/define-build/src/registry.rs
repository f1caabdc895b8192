//! Static section registry.
//!
//! Top-level list-valued DDS sections are dispatched through this closed
//! enumeration rather than by evaluating section names dynamically. The
//! processing order is fixed: Conditions must be flattened before
//! WhereClauses resolve them, and datasets must exist before anything that
//! joins against them, so the registry order is a strict must-run-before
//! relationship, not a convenience default.

/// The closed set of DDS sections with a registered builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Standards,
    AnnotatedCrf,
    Documents,
    ItemGroups,
    CodeLists,
    Dictionaries,
    ConceptProperties,
    Conditions,
    WhereClauses,
    Methods,
    Comments,
}

impl Section {
    /// Dependency-safe processing order for all registered sections.
    pub const PROCESSING_ORDER: [Section; 11] = [
        Section::Standards,
        Section::AnnotatedCrf,
        Section::Documents,
        Section::ItemGroups,
        Section::CodeLists,
        Section::Dictionaries,
        Section::ConceptProperties,
        Section::Conditions,
        Section::WhereClauses,
        Section::Methods,
        Section::Comments,
    ];

    /// The top-level DDS key this section is routed by.
    pub fn name(self) -> &'static str {
        match self {
            Section::Standards => "standards",
            Section::AnnotatedCrf => "annotatedCRF",
            Section::Documents => "documents",
            Section::ItemGroups => "itemGroups",
            Section::CodeLists => "codeLists",
            Section::Dictionaries => "dictionaries",
            Section::ConceptProperties => "conceptProperties",
            Section::Conditions => "conditions",
            Section::WhereClauses => "whereClauses",
            Section::Methods => "methods",
            Section::Comments => "comments",
        }
    }

    /// Resolve a top-level key to its registered section, if any.
    pub fn from_name(name: &str) -> Option<Section> {
        Section::PROCESSING_ORDER
            .into_iter()
            .find(|section| section.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::Section;

    #[test]
    fn every_section_round_trips_through_its_name() {
        for section in Section::PROCESSING_ORDER {
            assert_eq!(Section::from_name(section.name()), Some(section));
        }
    }

    #[test]
    fn unknown_names_have_no_builder() {
        assert_eq!(Section::from_name("futureSection"), None);
        assert_eq!(Section::from_name("ItemGroups"), None);
    }

    #[test]
    fn conditions_precede_where_clauses() {
        let order = Section::PROCESSING_ORDER;
        let conditions = order.iter().position(|s| *s == Section::Conditions).unwrap();
        let where_clauses = order
            .iter()
            .position(|s| *s == Section::WhereClauses)
            .unwrap();
        assert!(conditions < where_clauses);
    }
}
