//! Motor de traducción de filtros.

mod base;
mod builder;
mod field;
mod filter;
mod kinds;
mod parameter;

pub use base::{BaseQuery, BuilderSource};
pub use builder::{Comparison, NativeBuilder, Predicate};
pub use field::{resolve_field, strip_alias, FIELD_SEPARATOR};
pub use filter::{Filter, FilterOp, FilterQuery};
pub use kinds::{DeleteQuery, Order, SelectQuery, UpdateQuery};
pub use parameter::{ParameterAllocator, ParameterId};
