//! Per-run build context.

/// Values resolved once from the study metadata and consumed by every
/// builder: the TranslatedText language and the annotated-CRF leaf that
/// variable origin page references point at.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub lang: String,
    pub acrf_leaf_id: String,
}
