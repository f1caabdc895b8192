pub mod elements;
pub mod error;
pub mod ids;
pub mod store;

pub use elements::{
    Alias, AnnotatedCrf, CodeList, CodeListItem, CodeListTerms, CommentDef, DefineDocument,
    Description, DocumentRef, EnumeratedItem, ExternalCodeList, FormalExpression, ItemDef,
    ItemGroupDef, ItemRef, Leaf, MetaDataVersion, MethodDef, Origin, PdfPageRef, RangeCheck,
    Standard, Study, TranslatedText, ValueListDef, WhereClauseDef, YesNo,
};
pub use error::{ModelError, Result};
pub use ids::generate_oid;
pub use store::{DefineStore, Family, StashedCondition, StashedRangeCheck};
