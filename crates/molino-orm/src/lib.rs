//! molino-orm
//!
//! Backend relacional: las queries traducen filtros a un `QueryBuilder`
//! estilo DQL (`SELECT m FROM Article m WHERE m.title = ?1`) y un
//! `EntityManager` en memoria las ejecuta con semántica SQL.
//!
//! Módulos:
//! - `builder`: `QueryBuilder` (implementa `NativeBuilder`).
//! - `query`: `OrmSelectQuery`, `OrmUpdateQuery`, `OrmDeleteQuery`.
//! - `entity_manager`: tablas en memoria y ejecución de sentencias.
//! - `molino`: facade `OrmMolino`.

pub mod builder;
pub mod entity_manager;
pub mod error;
pub mod eval;
pub mod molino;
pub mod query;

pub use builder::{QueryBuilder, StatementKind};
pub use entity_manager::EntityManager;
pub use error::OrmError;
pub use molino::OrmMolino;
pub use query::{OrmDeleteQuery, OrmSelectQuery, OrmSource, OrmUpdateQuery};
