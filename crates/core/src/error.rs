use thiserror::Error;

/// Failures raised while assembling statement text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{clause} requires at least one field")]
    EmptyClause { clause: &'static str },
    #[error("cannot build a merge for `{entity}`: no qualifiers given and no primary property declared")]
    MissingQualifiers { entity: String },
}

/// Failures raised at the metadata boundary, before any text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("unknown entity: {name}")]
    UnknownEntity { name: String },
    #[error("entity `{name}` is already registered")]
    DuplicateEntity { name: String },
    #[error("unknown operation: {value}")]
    UnknownOperation { value: String },
    #[error("unknown db type: {value}")]
    UnknownDbType { value: String },
    #[error("unknown command mode: {value}")]
    UnknownCommandMode { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

pub type Result<T> = std::result::Result<T, Error>;
