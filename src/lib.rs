//! Molino
//!
//! Capa de acceso a datos con una API de filtros común para dos backends:
//! - `orm`: `QueryBuilder` estilo DQL ejecutado por un `EntityManager`.
//! - `document`: criterios estilo Mongo evaluados por un `DocumentStore`.
//!
//! El backend se elige con `MolinoConfig` (variable `MOLINO_BACKEND`) y se
//! usa a través de `AnyMolino`.

pub mod config;
pub mod router;

pub use config::{init_dotenv, BackendKind, MolinoConfig};
pub use molino_core::{DeleteQuery, FilterOp, FilterQuery, ModelMetadata, Molino, MolinoError, MolinoResult, Order,
                      Record, SelectQuery, UpdateQuery, Value};
pub use router::{AnyDeleteQuery, AnyMolino, AnySelectQuery, AnyUpdateQuery};
