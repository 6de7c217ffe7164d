//! Errores del runtime relacional.
//! Se mapean a `MolinoError` para que el facade los propague sin reinterpretar.

use molino_core::MolinoError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OrmError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("unknown alias '{alias}' in '{field}'")]
    UnknownAlias { alias: String, field: String },
    #[error("parameter ?{0} is not bound")]
    MissingParameter(u64),
    #[error("entity '{0}' has not been persisted")]
    NotPersisted(String),
    #[error("cannot increment '{field}': {reason}")]
    InvalidIncrement { field: String, reason: String },
    #[error("invalid statement: {0}")]
    InvalidStatement(String),
}

impl From<OrmError> for MolinoError {
    fn from(err: OrmError) -> Self {
        match err {
            OrmError::UnknownEntity(model) => Self::UnknownModel(model),
            OrmError::NotPersisted(model) => Self::NotPersisted { model },
            other => Self::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entity_maps_to_unknown_model() {
        let err: MolinoError = OrmError::UnknownEntity("Article".into()).into();
        assert_eq!(err, MolinoError::UnknownModel("Article".into()));
    }

    #[test]
    fn runtime_errors_map_to_backend() {
        let err: MolinoError = OrmError::MissingParameter(4).into();
        assert_eq!(err, MolinoError::Backend("parameter ?4 is not bound".into()));
    }
}
