//! Enrutado entre backends.
//!
//! `AnyMolino` envuelve el facade elegido por configuración y sus queries
//! (`AnySelectQuery`, `AnyUpdateQuery`, `AnyDeleteQuery`) delegan cada
//! llamada en la query concreta del backend. La traducción de filtros no se
//! duplica: vive en `BaseQuery`.

use log::debug;
use molino_core::{DeleteQuery, Filter, FilterQuery, Molino, MolinoResult, ModelMetadata, Order, Record, SelectQuery,
                  UpdateQuery, Value};
use molino_document::{DocumentDeleteQuery, DocumentMolino, DocumentSelectQuery, DocumentUpdateQuery};
use molino_orm::{OrmDeleteQuery, OrmMolino, OrmSelectQuery, OrmUpdateQuery};

use crate::config::{BackendKind, MolinoConfig};

macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Self::Orm($inner) => $body,
            Self::Document($inner) => $body,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyMolino {
    Orm(OrmMolino),
    Document(DocumentMolino),
}

impl AnyMolino {
    pub fn new(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Orm => Self::Orm(OrmMolino::default()),
            BackendKind::Document => Self::Document(DocumentMolino::default()),
        }
    }

    pub fn from_config(config: &MolinoConfig) -> Self {
        debug!("molino:backend={}", config.backend);
        Self::new(config.backend)
    }

    pub fn from_env() -> MolinoResult<Self> {
        Ok(Self::from_config(&MolinoConfig::from_env()?))
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Orm(_) => BackendKind::Orm,
            Self::Document(_) => BackendKind::Document,
        }
    }

    pub fn register_model(&self, metadata: ModelMetadata) {
        dispatch!(self, m => m.register_model(metadata))
    }
}

impl Molino for AnyMolino {
    type Select = AnySelectQuery;
    type Update = AnyUpdateQuery;
    type Delete = AnyDeleteQuery;

    fn name(&self) -> &'static str {
        dispatch!(self, m => m.name())
    }

    fn create(&self, model: &str) -> MolinoResult<Record> {
        dispatch!(self, m => m.create(model))
    }

    fn save(&self, record: &mut Record) -> MolinoResult<()> {
        dispatch!(self, m => m.save(record))
    }

    fn refresh(&self, record: &mut Record) -> MolinoResult<()> {
        dispatch!(self, m => m.refresh(record))
    }

    fn delete(&self, record: &mut Record) -> MolinoResult<()> {
        dispatch!(self, m => m.delete(record))
    }

    fn create_select_query(&self, model: &str) -> MolinoResult<AnySelectQuery> {
        Ok(match self {
            Self::Orm(m) => AnySelectQuery::Orm(m.create_select_query(model)?),
            Self::Document(m) => AnySelectQuery::Document(m.create_select_query(model)?),
        })
    }

    fn create_update_query(&self, model: &str) -> MolinoResult<AnyUpdateQuery> {
        Ok(match self {
            Self::Orm(m) => AnyUpdateQuery::Orm(m.create_update_query(model)?),
            Self::Document(m) => AnyUpdateQuery::Document(m.create_update_query(model)?),
        })
    }

    fn create_delete_query(&self, model: &str) -> MolinoResult<AnyDeleteQuery> {
        Ok(match self {
            Self::Orm(m) => AnyDeleteQuery::Orm(m.create_delete_query(model)?),
            Self::Document(m) => AnyDeleteQuery::Document(m.create_delete_query(model)?),
        })
    }

    fn find_one_by_id(&self, model: &str, id: &Value) -> MolinoResult<Option<Record>> {
        dispatch!(self, m => m.find_one_by_id(model, id))
    }
}

macro_rules! any_query {
    ($name:ident, $orm:ty, $document:ty) => {
        #[derive(Debug, Clone)]
        pub enum $name {
            Orm($orm),
            Document($document),
        }

        impl $name {
            /// Forma nativa de la query: DQL o documento de criterios.
            pub fn native_query(&mut self) -> String {
                match self {
                    Self::Orm(q) => q.get_dql(),
                    Self::Document(q) => q.criteria().to_string(),
                }
            }
        }

        impl FilterQuery for $name {
            fn model(&self) -> &str {
                dispatch!(self, q => q.model())
            }

            fn apply_filter(&mut self, filter: Filter) -> MolinoResult<()> {
                dispatch!(self, q => q.apply_filter(filter))
            }
        }
    };
}

any_query!(AnySelectQuery, OrmSelectQuery, DocumentSelectQuery);
any_query!(AnyUpdateQuery, OrmUpdateQuery, DocumentUpdateQuery);
any_query!(AnyDeleteQuery, OrmDeleteQuery, DocumentDeleteQuery);

impl SelectQuery for AnySelectQuery {
    fn fields(&mut self, fields: &[&str]) -> MolinoResult<&mut Self> {
        dispatch!(self, q => { q.fields(fields)?; });
        Ok(self)
    }

    fn sort(&mut self, field: &str, order: Order) -> MolinoResult<&mut Self> {
        dispatch!(self, q => { q.sort(field, order)?; });
        Ok(self)
    }

    fn limit(&mut self, limit: usize) -> &mut Self {
        dispatch!(self, q => { q.limit(limit); });
        self
    }

    fn skip(&mut self, skip: usize) -> &mut Self {
        dispatch!(self, q => { q.skip(skip); });
        self
    }

    fn all(&mut self) -> MolinoResult<Vec<Record>> {
        dispatch!(self, q => q.all())
    }

    fn one(&mut self) -> MolinoResult<Option<Record>> {
        dispatch!(self, q => q.one())
    }

    fn count(&mut self) -> MolinoResult<usize> {
        dispatch!(self, q => q.count())
    }
}

impl UpdateQuery for AnyUpdateQuery {
    fn set(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        let value = value.into();
        dispatch!(self, q => { q.set(field, value)?; });
        Ok(self)
    }

    fn inc(&mut self, field: &str, amount: impl Into<Value>) -> MolinoResult<&mut Self> {
        let amount = amount.into();
        dispatch!(self, q => { q.inc(field, amount)?; });
        Ok(self)
    }

    fn execute(&mut self) -> MolinoResult<usize> {
        dispatch!(self, q => UpdateQuery::execute(q))
    }
}

impl DeleteQuery for AnyDeleteQuery {
    fn execute(&mut self) -> MolinoResult<usize> {
        dispatch!(self, q => DeleteQuery::execute(q))
    }
}
