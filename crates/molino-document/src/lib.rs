//! molino-document
//!
//! Backend documental. Las queries traducen filtros a un `CriteriaBuilder`
//! que se renderiza como criterios estilo Mongo (`{"title": {"$eq": ...}}`)
//! y un `DocumentStore` en memoria los evalúa con semántica documental: un
//! campo ausente satisface `$ne`, `$nin` y `$not`.

pub mod builder;
pub mod error;
pub mod eval;
pub mod molino;
pub mod query;
pub mod store;

pub use builder::{CriteriaBuilder, Modifier};
pub use error::DocumentError;
pub use molino::DocumentMolino;
pub use query::{DocumentDeleteQuery, DocumentSelectQuery, DocumentSource, DocumentUpdateQuery};
pub use store::DocumentStore;
