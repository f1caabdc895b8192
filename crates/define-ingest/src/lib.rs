pub mod dds;
pub mod error;
pub mod loader;

pub use dds::{
    CodeListEntry, CodeListRefShape, CommentEntry, ConditionEntry, DatasetEntry, DictionaryEntry,
    DocumentEntry, FlexString, MethodEntry, OriginEntry, RangeCheckEntry, SliceEntry,
    StandardEntry, StudyHeader, TermEntry, ValueListRefShape, VariableEntry, WhereClauseEntry,
};
pub use error::{IngestError, Result};
pub use loader::load_dds;
