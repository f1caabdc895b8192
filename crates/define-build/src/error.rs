use std::path::PathBuf;

use thiserror::Error;

use define_model::ModelError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("required field '{field}' missing in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },
    #[error("{referrer} references {family} OID '{oid}' which has not been defined")]
    UnresolvedReference {
        family: &'static str,
        oid: String,
        referrer: String,
    },
    #[error("the DDS document root must be a JSON object")]
    RootNotAnObject,
    #[error("section '{section}' does not match its expected shape: {source}")]
    SectionShape {
        section: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to {operation} condition stash {path}: {source}")]
    StashIo {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed condition stash {path}: {source}")]
    StashFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
