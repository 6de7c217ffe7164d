//! Errores del store documental; se mapean a `MolinoError`.

use molino_core::MolinoError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
    #[error("parameter ?{0} is not bound")]
    MissingParameter(u64),
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("document '{0}' has not been persisted")]
    NotPersisted(String),
    #[error("cannot $inc '{field}': {reason}")]
    InvalidIncrement { field: String, reason: String },
    #[error("cannot modify immutable field '{0}'")]
    ImmutableField(String),
    #[error("invalid document id: {0}")]
    InvalidId(String),
}

impl From<DocumentError> for MolinoError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::UnknownCollection(model) => Self::UnknownModel(model),
            DocumentError::NotPersisted(model) => Self::NotPersisted { model },
            other => Self::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_molino_error() {
        let err: MolinoError = DocumentError::UnknownCollection("Article".into()).into();
        assert_eq!(err, MolinoError::UnknownModel("Article".into()));

        let err: MolinoError = DocumentError::InvalidPattern { pattern: "^(.*$".into(),
                                                               reason: "unclosed group".into() }.into();
        assert!(matches!(err, MolinoError::Backend(msg) if msg.contains("^(.*$")));
    }
}
