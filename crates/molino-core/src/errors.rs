//! Errores del núcleo de traducción y del facade.
//!
//! Ninguno de estos errores es reintentable: todas las operaciones del núcleo
//! son transformaciones en memoria. Los errores de ejecución de cada backend
//! llegan como `Backend` sin reinterpretarse.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MolinoError {
    #[error("query builder for model '{model}' declares no root alias")]
    MissingRootAlias { model: String },
    #[error("invalid argument for {operation} on '{field}': {reason}")]
    InvalidFilterArgument { operation: &'static str, field: String, reason: String },
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("record of model '{model}' has not been persisted")]
    NotPersisted { model: String },
    #[error("backend error: {0}")]
    Backend(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type MolinoResult<T> = Result<T, MolinoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_alias_format() {
        let err = MolinoError::MissingRootAlias { model: "Article".into() };
        assert_eq!(err.to_string(), "query builder for model 'Article' declares no root alias");
    }

    #[test]
    fn invalid_filter_argument_format() {
        let err = MolinoError::InvalidFilterArgument { operation: "filter_in",
                                                       field: "m.id".into(),
                                                       reason: "expected a list".into() };
        assert_eq!(err.to_string(), "invalid argument for filter_in on 'm.id': expected a list");
    }
}
