pub mod builders;
pub mod context;
pub mod error;
pub mod options;
pub mod orchestrator;
pub mod registry;
pub mod stash;

pub use context::BuildContext;
pub use error::{BuildError, Result};
pub use options::BuildOptions;
pub use orchestrator::{BuildReport, build_document, build_document_with_conditions, collect_conditions};
pub use registry::Section;
pub use stash::{read_stash, write_stash};
