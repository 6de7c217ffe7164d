//! Queries del backend relacional.
//!
//! Las tres variantes comparten `BaseQuery<OrmSource>`; sólo difieren en el
//! hook de configuración (`SELECT m` / `UPDATE` / `DELETE`) y en su operación
//! terminal.

use std::sync::Arc;

use molino_core::{BaseQuery, BuilderSource, DeleteQuery, Filter, FilterQuery, MolinoResult, Order, Record,
                  SelectQuery, UpdateQuery, Value, ROOT_ALIAS};

use crate::builder::{QueryBuilder, StatementKind};
use crate::entity_manager::EntityManager;
use crate::eval::column_name;

/// Crea builders contra un `EntityManager` para un tipo de sentencia.
#[derive(Debug, Clone)]
pub struct OrmSource {
    entity_manager: Arc<EntityManager>,
    kind: StatementKind,
}

impl OrmSource {
    pub fn new(entity_manager: Arc<EntityManager>, kind: StatementKind) -> Self {
        Self { entity_manager, kind }
    }

    pub fn entity_manager(&self) -> &EntityManager {
        &self.entity_manager
    }
}

impl BuilderSource for OrmSource {
    type Builder = QueryBuilder;

    fn create_builder(&self, model: &str) -> QueryBuilder {
        let mut qb = self.entity_manager.create_query_builder();
        qb.from(model, ROOT_ALIAS);
        qb
    }

    fn configure_builder(&self, qb: &mut QueryBuilder) {
        match self.kind {
            StatementKind::Select => qb.select(),
            StatementKind::Update => qb.update(),
            StatementKind::Delete => qb.delete(),
        };
    }
}

macro_rules! orm_query {
    ($name:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            base: BaseQuery<OrmSource>,
        }

        impl $name {
            /// Builder nativo (se construye en el primer acceso).
            pub fn query_builder(&mut self) -> &mut QueryBuilder {
                self.base.query_builder()
            }

            pub fn base(&self) -> &BaseQuery<OrmSource> {
                &self.base
            }

            pub fn get_dql(&mut self) -> String {
                self.base.query_builder().get_dql()
            }
        }

        impl FilterQuery for $name {
            fn model(&self) -> &str {
                self.base.model()
            }

            fn apply_filter(&mut self, filter: Filter) -> MolinoResult<()> {
                self.base.apply_filter(filter)
            }
        }
    };
}

orm_query!(OrmSelectQuery);
orm_query!(OrmUpdateQuery);
orm_query!(OrmDeleteQuery);

impl OrmSelectQuery {
    pub fn new(entity_manager: Arc<EntityManager>, model: &str) -> Self {
        Self { base: BaseQuery::new(OrmSource::new(entity_manager, StatementKind::Select), model) }
    }
}

impl SelectQuery for OrmSelectQuery {
    fn fields(&mut self, fields: &[&str]) -> MolinoResult<&mut Self> {
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            let qualified = self.base.resolve_field(field)?;
            columns.push(column_name(&qualified, ROOT_ALIAS)?.to_string());
        }
        self.base.query_builder().select_partial(columns);
        Ok(self)
    }

    fn sort(&mut self, field: &str, order: Order) -> MolinoResult<&mut Self> {
        let field = self.base.resolve_field(field)?;
        self.base.query_builder().add_order_by(field, order);
        Ok(self)
    }

    fn limit(&mut self, limit: usize) -> &mut Self {
        self.base.query_builder().set_max_results(limit);
        self
    }

    fn skip(&mut self, skip: usize) -> &mut Self {
        self.base.query_builder().set_first_result(skip);
        self
    }

    fn all(&mut self) -> MolinoResult<Vec<Record>> {
        let (source, qb) = self.base.parts();
        let em = source.entity_manager();
        Ok(em.execute_select(qb)?)
    }

    fn one(&mut self) -> MolinoResult<Option<Record>> {
        let mut limited = self.clone();
        limited.limit(1);
        Ok(limited.all()?.into_iter().next())
    }

    fn count(&mut self) -> MolinoResult<usize> {
        let (source, qb) = self.base.parts();
        let em = source.entity_manager();
        Ok(em.execute_count(qb)?)
    }
}

impl OrmUpdateQuery {
    pub fn new(entity_manager: Arc<EntityManager>, model: &str) -> Self {
        Self { base: BaseQuery::new(OrmSource::new(entity_manager, StatementKind::Update), model) }
    }
}

impl UpdateQuery for OrmUpdateQuery {
    fn set(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        let field = self.base.resolve_field(field)?;
        let parameter = self.base.bind(value.into());
        self.base.query_builder().set(field, parameter);
        Ok(self)
    }

    fn inc(&mut self, field: &str, amount: impl Into<Value>) -> MolinoResult<&mut Self> {
        let field = self.base.resolve_field(field)?;
        let parameter = self.base.bind(amount.into());
        self.base.query_builder().increment(field, parameter);
        Ok(self)
    }

    fn execute(&mut self) -> MolinoResult<usize> {
        let (source, qb) = self.base.parts();
        let em = source.entity_manager();
        Ok(em.execute_update(qb)?)
    }
}

impl OrmDeleteQuery {
    pub fn new(entity_manager: Arc<EntityManager>, model: &str) -> Self {
        Self { base: BaseQuery::new(OrmSource::new(entity_manager, StatementKind::Delete), model) }
    }
}

impl DeleteQuery for OrmDeleteQuery {
    fn execute(&mut self) -> MolinoResult<usize> {
        let (source, qb) = self.base.parts();
        let em = source.entity_manager();
        Ok(em.execute_delete(qb)?)
    }
}
