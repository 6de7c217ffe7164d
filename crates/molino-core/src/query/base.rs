//! `BaseQuery`: traductor de filtros común a todos los backends.
//!
//! Responsabilidades:
//! - Construir perezosamente el builder nativo (raíz + alias `m`), invocar
//!   el hook de configuración una sola vez y cachearlo.
//! - Calificar campos, asignar ids de parámetro y emitir predicados.
//! - Clonar de forma profunda: el builder pertenece en exclusiva a la query,
//!   así que clonar la query clona el builder (o lo deja sin construir).

use log::{debug, trace};

use super::builder::{Comparison, NativeBuilder, Predicate};
use super::field::resolve_field;
use super::filter::{Filter, FilterOp, FilterQuery};
use super::parameter::{ParameterAllocator, ParameterId};
use crate::errors::{MolinoError, MolinoResult};
use crate::like::build_like_value;
use crate::value::Value;

/// Origen del builder nativo de una query.
///
/// Cada backend (y cada tipo de query dentro del backend) aporta su
/// implementación: cómo crear el builder para un modelo y cómo configurarlo
/// antes del primer uso.
pub trait BuilderSource: Clone {
    type Builder: NativeBuilder;

    /// Crea el builder declarando la entidad raíz y su alias.
    fn create_builder(&self, model: &str) -> Self::Builder;

    /// Hook de configuración; por defecto no hace nada.
    fn configure_builder(&self, _builder: &mut Self::Builder) {}
}

pub struct BaseQuery<S: BuilderSource> {
    source: S,
    model: String,
    query_builder: Option<S::Builder>,
    parameters: ParameterAllocator,
}

impl<S: BuilderSource> BaseQuery<S> {
    pub fn new(source: S, model: impl Into<String>) -> Self {
        Self { source,
               model: model.into(),
               query_builder: None,
               parameters: ParameterAllocator::new() }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn has_query_builder(&self) -> bool {
        self.query_builder.is_some()
    }

    /// Builder ya construido, sin forzar su creación.
    pub fn peek_query_builder(&self) -> Option<&S::Builder> {
        self.query_builder.as_ref()
    }

    /// Devuelve el builder, creándolo y configurándolo en el primer acceso.
    pub fn query_builder(&mut self) -> &mut S::Builder {
        let Self { source,
                   model,
                   query_builder,
                   .. } = self;
        query_builder.get_or_insert_with(|| build(source, model))
    }

    /// Fuente y builder a la vez; lo usan las operaciones terminales para
    /// ejecutar el builder contra el runtime del backend.
    pub fn parts(&mut self) -> (&S, &S::Builder) {
        let Self { source,
                   model,
                   query_builder,
                   .. } = self;
        let builder = query_builder.get_or_insert_with(|| build(source, model));
        (&*source, &*builder)
    }

    pub fn next_parameter_id(&mut self) -> ParameterId {
        self.parameters.next_id()
    }

    pub fn last_parameter_id(&self) -> Option<ParameterId> {
        self.parameters.last_id()
    }

    /// Califica `field` con el alias raíz del builder (construyéndolo si hace falta).
    pub fn resolve_field(&mut self, field: &str) -> MolinoResult<String> {
        self.query_builder();
        let aliases = self.query_builder.as_ref().map(|b| b.root_aliases()).unwrap_or_default();
        resolve_field(field, aliases, &self.model)
    }

    /// Asigna un id nuevo y liga `value` sin añadir predicado. Las update
    /// queries lo usan para sus asignaciones y así comparten la numeración.
    pub fn bind(&mut self, value: Value) -> ParameterId {
        let id = self.next_parameter_id();
        self.query_builder().set_parameter(id, value);
        id
    }

    fn and_where(&mut self, field: &str, comparison: Comparison, value: Value) -> MolinoResult<()> {
        let field = self.resolve_field(field)?;
        let parameter = self.next_parameter_id();
        let predicate = Predicate::Compare { field, comparison, parameter };
        trace!("and_where model={} predicate={predicate}", self.model);
        let builder = self.query_builder();
        builder.and_where(predicate);
        builder.set_parameter(parameter, value);
        Ok(())
    }

    fn and_where_membership(&mut self, field: &str, values: Value, negated: bool) -> MolinoResult<()> {
        let field = self.resolve_field(field)?;
        let parameter = self.next_parameter_id();
        let predicate = Predicate::Membership { field, parameter, negated };
        trace!("and_where model={} predicate={predicate}", self.model);
        let builder = self.query_builder();
        builder.and_where(predicate);
        builder.set_parameter(parameter, values);
        Ok(())
    }
}

fn build<S: BuilderSource>(source: &S, model: &str) -> S::Builder {
    let mut builder = source.create_builder(model);
    source.configure_builder(&mut builder);
    debug!("query_builder:created model={model}");
    builder
}

fn invalid_argument(op: FilterOp, field: &str, reason: String) -> MolinoError {
    MolinoError::InvalidFilterArgument { operation: op.name(),
                                         field: field.to_string(),
                                         reason }
}

impl<S: BuilderSource> FilterQuery for BaseQuery<S> {
    fn model(&self) -> &str {
        &self.model
    }

    fn apply_filter(&mut self, filter: Filter) -> MolinoResult<()> {
        let Filter { field, op, value } = filter;
        match op {
            FilterOp::In | FilterOp::NotIn => {
                if value.as_list().is_none() {
                    return Err(invalid_argument(op, &field, format!("expected a list, got {}", value.type_name())));
                }
                self.and_where_membership(&field, value, op == FilterOp::NotIn)
            }
            FilterOp::Like | FilterOp::NotLike => {
                let pattern = value.as_str()
                                   .ok_or_else(|| invalid_argument(op, &field, format!("expected a string, got {}", value.type_name())))?;
                let like = build_like_value(pattern, <S::Builder as NativeBuilder>::LIKE_WILDCARD);
                let comparison = if op == FilterOp::Like { Comparison::Like } else { Comparison::NotLike };
                self.and_where(&field, comparison, Value::String(like))
            }
            _ => match op.comparison() {
                Some(comparison) => self.and_where(&field, comparison, value),
                None => Err(invalid_argument(op, &field, "operation has no binary operator".into())),
            },
        }
    }
}

impl<S: BuilderSource> Clone for BaseQuery<S> {
    fn clone(&self) -> Self {
        if self.query_builder.is_some() {
            trace!("clone model={} copying constructed builder", self.model);
        }
        Self { source: self.source.clone(),
               model: self.model.clone(),
               query_builder: self.query_builder.clone(),
               parameters: self.parameters.clone() }
    }
}

impl<S: BuilderSource> std::fmt::Debug for BaseQuery<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseQuery")
         .field("model", &self.model)
         .field("query_builder", &self.query_builder)
         .field("last_parameter_id", &self.parameters.last_id())
         .finish()
    }
}
