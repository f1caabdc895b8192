//! Study and MetaDataVersion singletons.

use define_ingest::StudyHeader;
use define_model::{DefineStore, MetaDataVersion, Study, generate_oid};

use crate::builders::require;
use crate::error::Result;

/// Build the Study and MetaDataVersion singletons from the top-level study
/// metadata. Runs before any list section so other builders can read the
/// resolved language and annotated-CRF identifier.
pub fn build_study(header: &StudyHeader, store: &mut DefineStore) -> Result<()> {
    let study_oid = require(header.study_oid.clone(), "studyOID", "study metadata")?;
    let study_name = require(header.study_name.clone(), "studyName", "study metadata")?;

    store.set_study(Study {
        oid: study_oid,
        study_name: study_name.clone(),
        study_description: header
            .study_description
            .clone()
            .unwrap_or_else(|| "NA".to_string()),
        protocol_name: header
            .protocol_name
            .clone()
            .unwrap_or_else(|| "NA".to_string()),
    });

    store.set_metadata_version(MetaDataVersion {
        oid: generate_oid(&["MDV", &study_name]),
        name: format!("MDV {study_name}"),
        description: format!("Data Definitions for {study_name}"),
        define_version: "2.1.0".to_string(),
    });
    Ok(())
}
