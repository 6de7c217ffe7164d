//! `OrmMolino`: facade sobre el `EntityManager`.

use std::sync::Arc;

use log::debug;
use molino_core::{Molino, MolinoError, MolinoResult, ModelMetadata, Record, Value};

use crate::entity_manager::EntityManager;
use crate::query::{OrmDeleteQuery, OrmSelectQuery, OrmUpdateQuery};

#[derive(Debug, Clone, Default)]
pub struct OrmMolino {
    entity_manager: Arc<EntityManager>,
}

impl OrmMolino {
    pub fn new(entity_manager: Arc<EntityManager>) -> Self {
        Self { entity_manager }
    }

    pub fn entity_manager(&self) -> &Arc<EntityManager> {
        &self.entity_manager
    }

    pub fn register_model(&self, metadata: ModelMetadata) {
        self.entity_manager.register(metadata);
    }

    fn ensure_registered(&self, model: &str) -> MolinoResult<()> {
        if self.entity_manager.is_registered(model) {
            Ok(())
        } else {
            Err(MolinoError::UnknownModel(model.to_string()))
        }
    }
}

impl Molino for OrmMolino {
    type Select = OrmSelectQuery;
    type Update = OrmUpdateQuery;
    type Delete = OrmDeleteQuery;

    fn name(&self) -> &'static str {
        "orm"
    }

    fn create(&self, model: &str) -> MolinoResult<Record> {
        Ok(self.entity_manager.instantiate(model)?)
    }

    fn save(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.entity_manager.persist(record)?)
    }

    fn refresh(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.entity_manager.refresh(record)?)
    }

    fn delete(&self, record: &mut Record) -> MolinoResult<()> {
        Ok(self.entity_manager.remove(record)?)
    }

    fn create_select_query(&self, model: &str) -> MolinoResult<OrmSelectQuery> {
        self.ensure_registered(model)?;
        debug!("create_select_query model={model}");
        Ok(OrmSelectQuery::new(self.entity_manager.clone(), model))
    }

    fn create_update_query(&self, model: &str) -> MolinoResult<OrmUpdateQuery> {
        self.ensure_registered(model)?;
        debug!("create_update_query model={model}");
        Ok(OrmUpdateQuery::new(self.entity_manager.clone(), model))
    }

    fn create_delete_query(&self, model: &str) -> MolinoResult<OrmDeleteQuery> {
        self.ensure_registered(model)?;
        debug!("create_delete_query model={model}");
        Ok(OrmDeleteQuery::new(self.entity_manager.clone(), model))
    }

    fn find_one_by_id(&self, model: &str, id: &Value) -> MolinoResult<Option<Record>> {
        Ok(self.entity_manager.find(model, id)?)
    }
}
