//! `DocumentMolino`: facade sobre el `DocumentStore`.

use std::sync::Arc;

use log::debug;
use molino_core::{Molino, MolinoError, MolinoResult, ModelMetadata, Record, Value};

use crate::query::{DocumentDeleteQuery, DocumentSelectQuery, DocumentUpdateQuery};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Default)]
pub struct DocumentMolino {
    store: Arc<DocumentStore>,
}

impl DocumentMolino {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn register_model(&self, metadata: ModelMetadata) {
        self.store.register(metadata);
    }

    fn ensure_registered(&self, model: &str) -> MolinoResult<()> {
        if !self.store.is_registered(model) {
            return Err(MolinoError::UnknownModel(model.to_string()));
        }
        Ok(())
    }
}

impl Molino for DocumentMolino {
    type Select = DocumentSelectQuery;
    type Update = DocumentUpdateQuery;
    type Delete = DocumentDeleteQuery;

    fn name(&self) -> &'static str {
        "document"
    }

    fn create(&self, model: &str) -> MolinoResult<Record> {
        Ok(self.store.instantiate(model)?)
    }

    fn save(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.store.save(record)?)
    }

    fn refresh(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.store.reload(record)?)
    }

    fn delete(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.store.remove(record)?)
    }

    fn create_select_query(&self, model: &str) -> MolinoResult<DocumentSelectQuery> {
        self.ensure_registered(model)?;
        debug!("create_select_query collection={model}");
        Ok(DocumentSelectQuery::new(self.store.clone(), model))
    }

    fn create_update_query(&self, model: &str) -> MolinoResult<DocumentUpdateQuery> {
        self.ensure_registered(model)?;
        debug!("create_update_query collection={model}");
        Ok(DocumentUpdateQuery::new(self.store.clone(), model))
    }

    fn create_delete_query(&self, model: &str) -> MolinoResult<DocumentDeleteQuery> {
        self.ensure_registered(model)?;
        debug!("create_delete_query collection={model}");
        Ok(DocumentDeleteQuery::new(self.store.clone(), model))
    }

    fn find_one_by_id(&self, model: &str, id: &Value) -> MolinoResult<Option<Record>> {
        Ok(self.store.find_by_id(model, id)?)
    }
}
