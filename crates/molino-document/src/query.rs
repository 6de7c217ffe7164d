//! Queries del backend documental.
//!
//! `DocumentSource` no necesita hook de configuración: el mismo
//! `CriteriaBuilder` sirve para find, update y remove.

use std::sync::Arc;

use molino_core::{BaseQuery, BuilderSource, DeleteQuery, Filter, FilterQuery, MolinoResult, Order, ParameterId, Record,
                  SelectQuery, UpdateQuery, Value, ROOT_ALIAS};

use crate::builder::{CriteriaBuilder, Modifier};
use crate::store::DocumentStore;

#[derive(Debug, Clone)]
pub struct DocumentSource {
    store: Arc<DocumentStore>,
}

impl DocumentSource {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

impl BuilderSource for DocumentSource {
    type Builder = CriteriaBuilder;

    fn create_builder(&self, model: &str) -> CriteriaBuilder {
        CriteriaBuilder::new(model, ROOT_ALIAS)
    }
}

macro_rules! document_query {
    ($name:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            base: BaseQuery<DocumentSource>,
        }

        impl $name {
            pub fn new(store: Arc<DocumentStore>, model: &str) -> Self {
                Self { base: BaseQuery::new(DocumentSource::new(store), model) }
            }

            pub fn query_builder(&mut self) -> &mut CriteriaBuilder {
                self.base.query_builder()
            }

            pub fn base(&self) -> &BaseQuery<DocumentSource> {
                &self.base
            }

            /// Documento de criterios acumulado hasta ahora.
            pub fn criteria(&mut self) -> serde_json::Value {
                self.base.query_builder().criteria()
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

document_query!(DocumentSelectQuery);
document_query!(DocumentUpdateQuery);
document_query!(DocumentDeleteQuery);

impl SelectQuery for DocumentSelectQuery {
    fn fields(&mut self, fields: &[&str]) -> MolinoResult<&mut Self> {
        let mut paths = Vec::with_capacity(fields.len());
        for field in fields {
            let qualified = self.base.resolve_field(field)?;
            paths.push(self.base.query_builder().field_path(&qualified).to_string());
        }
        self.base.query_builder().project(paths);
        Ok(self)
    }

    fn sort(&mut self, field: &str, order: Order) -> MolinoResult<&mut Self> {
        let field = self.base.resolve_field(field)?;
        self.base.query_builder().sort(field, order);
        Ok(self)
    }

    fn limit(&mut self, limit: usize) -> &mut Self {
        self.base.query_builder().limit(limit);
        self
    }

    fn skip(&mut self, skip: usize) -> &mut Self {
        self.base.query_builder().skip(skip);
        self
    }

    fn all(&mut self) -> MolinoResult<Vec<Record>> {
        let (source, cb) = self.base.parts();
        Ok(source.store().find(cb)?)
    }

    fn one(&mut self) -> MolinoResult<Option<Record>> {
        let mut limited = self.clone();
        limited.limit(1);
        Ok(limited.all()?.into_iter().next())
    }

    fn count(&mut self) -> MolinoResult<usize> {
        let (source, cb) = self.base.parts();
        Ok(source.store().count(cb)?)
    }
}

impl DocumentUpdateQuery {
    /// Documento `$set` / `$inc` acumulado.
    pub fn update_document(&mut self) -> serde_json::Value {
        self.base.query_builder().update_document()
    }

    fn modify(&mut self, field: &str, value: Value, modifier: fn(ParameterId) -> Modifier) -> MolinoResult<&mut Self> {
        let field = self.base.resolve_field(field)?;
        let parameter = self.base.bind(value);
        self.base.query_builder().modify(field, modifier(parameter));
        Ok(self)
    }
}

impl UpdateQuery for DocumentUpdateQuery {
    fn set(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.modify(field, value.into(), Modifier::Set)
    }

    fn inc(&mut self, field: &str, amount: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.modify(field, amount.into(), Modifier::Inc)
    }

    fn execute(&mut self) -> MolinoResult<usize> {
        let (source, cb) = self.base.parts();
        Ok(source.store().update_many(cb)?)
    }
}

impl DeleteQuery for DocumentDeleteQuery {
    fn execute(&mut self) -> MolinoResult<usize> {
        let (source, cb) = self.base.parts();
        Ok(source.store().delete_many(cb)?)
    }
}
