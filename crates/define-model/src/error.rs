use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unresolved {family} reference: no entity with OID '{oid}'")]
    UnresolvedReference { family: &'static str, oid: String },
    #[error("document assembly requires a {name} definition")]
    MissingSingleton { name: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
