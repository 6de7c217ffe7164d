//! molino-core: traducción de filtros agnóstica al backend.
//!
//! - `query`: `BaseQuery`, el trait `NativeBuilder` que implementa cada
//!   backend y la API fluida `FilterQuery`.
//! - `like`: parser de patrones con comodín `*`.
//! - `molino`: contrato del facade (`Molino`) y de sus queries.
//! - `value` / `record`: valores ligados y registros hidratados.
pub mod constants;
pub mod errors;
pub mod like;
pub mod molino;
pub mod query;
pub mod record;
pub mod value;

pub use constants::ROOT_ALIAS;
pub use errors::{MolinoError, MolinoResult};
pub use like::{build_like_value, parse_like_pattern, LikeSegment};
pub use molino::Molino;
pub use query::{resolve_field, strip_alias, BaseQuery, BuilderSource, Comparison, DeleteQuery, Filter, FilterOp, FilterQuery,
                NativeBuilder, Order, ParameterAllocator, ParameterId, Predicate, SelectQuery, UpdateQuery, FIELD_SEPARATOR};
pub use record::{ModelMetadata, Record};
pub use value::Value;
