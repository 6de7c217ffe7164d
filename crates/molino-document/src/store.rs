//! `DocumentStore` en memoria: runtime del backend documental.
//!
//! Una colección por modelo registrado; los documentos se identifican con
//! UUID v4 asignados al insertar.

use std::cmp::Ordering;

use dashmap::DashMap;
use indexmap::IndexMap;
use log::{debug, trace};
use molino_core::{ModelMetadata, Order, Record, Value};
use uuid::Uuid;

use crate::builder::{CriteriaBuilder, Modifier, ID_FIELD};
use crate::error::DocumentError;
use crate::eval::{field_value, Matcher};

type Collection = IndexMap<Uuid, IndexMap<String, Value>>;

#[derive(Debug, Default)]
pub struct DocumentStore {
    metadata: DashMap<String, ModelMetadata>,
    collections: DashMap<String, Collection>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, metadata: ModelMetadata) {
        debug!("register collection={}", metadata.name);
        self.collections.entry(metadata.name.clone()).or_default();
        self.metadata.insert(metadata.name.clone(), metadata);
    }

    pub fn is_registered(&self, collection: &str) -> bool {
        self.metadata.contains_key(collection)
    }

    pub fn instantiate(&self, collection: &str) -> Result<Record, DocumentError> {
        self.metadata
            .get(collection)
            .map(|m| m.instantiate())
            .ok_or_else(|| DocumentError::UnknownCollection(collection.to_string()))
    }

    /// Inserta (asignando un UUID) o reemplaza el documento completo.
    pub fn save(&self, record: &mut Record) -> Result<(), DocumentError> {
        let mut collection = self.collections
                                 .get_mut(&record.model)
                                 .ok_or_else(|| DocumentError::UnknownCollection(record.model.clone()))?;
        let id = match &record.id {
            None => Uuid::new_v4(),
            Some(id) => parse_id(id).ok_or_else(|| DocumentError::InvalidId(id.to_string()))?,
        };
        collection.insert(id, record.fields.clone());
        record.id = Some(Value::Uuid(id));
        trace!("save collection={} id={id}", record.model);
        Ok(())
    }

    pub fn reload(&self, record: &mut Record) -> Result<(), DocumentError> {
        let id = persisted_id(record)?;
        let collection = self.collections
                             .get(&record.model)
                             .ok_or_else(|| DocumentError::UnknownCollection(record.model.clone()))?;
        let fields = collection.get(&id).ok_or_else(|| DocumentError::NotPersisted(record.model.clone()))?;
        record.fields = fields.clone();
        Ok(())
    }

    pub fn remove(&self, record: &mut Record) -> Result<(), DocumentError> {
        let id = persisted_id(record)?;
        let mut collection = self.collections
                                 .get_mut(&record.model)
                                 .ok_or_else(|| DocumentError::UnknownCollection(record.model.clone()))?;
        collection.shift_remove(&id);
        record.id = None;
        trace!("remove collection={} id={id}", record.model);
        Ok(())
    }

    /// Ids no parseables como UUID simplemente no encuentran nada.
    pub fn find_by_id(&self, collection: &str, id: &Value) -> Result<Option<Record>, DocumentError> {
        let docs = self.collections
                       .get(collection)
                       .ok_or_else(|| DocumentError::UnknownCollection(collection.to_string()))?;
        Ok(parse_id(id).and_then(|id| docs.get(&id).map(|fields| hydrate(collection, id, fields))))
    }

    fn matching(&self, cb: &CriteriaBuilder) -> Result<Vec<Record>, DocumentError> {
        let matcher = Matcher::new(cb)?;
        let docs = self.collections
                       .get(cb.collection())
                       .ok_or_else(|| DocumentError::UnknownCollection(cb.collection().to_string()))?;
        let mut found = Vec::new();
        for (id, fields) in docs.iter() {
            let record = hydrate(cb.collection(), *id, fields);
            if matcher.matches(&record)? {
                found.push(record);
            }
        }
        Ok(found)
    }

    pub fn find(&self, cb: &CriteriaBuilder) -> Result<Vec<Record>, DocumentError> {
        debug!("find collection={} criteria={}", cb.collection(), cb.criteria());
        let mut records = self.matching(cb)?;
        let order: Vec<(&str, Order)> = cb.sort_fields()
                                          .iter()
                                          .map(|(field, order)| (cb.field_path(field), *order))
                                          .collect();
        if !order.is_empty() {
            records.sort_by(|a, b| compare_documents(a, b, &order));
        }
        let skip = cb.skip_value().unwrap_or(0);
        let take = cb.limit_value().unwrap_or(usize::MAX);
        let page = records.into_iter().skip(skip).take(take);
        Ok(match cb.projection() {
            Some(fields) => page.map(|r| r.project(fields)).collect(),
            None => page.collect(),
        })
    }

    pub fn count(&self, cb: &CriteriaBuilder) -> Result<usize, DocumentError> {
        debug!("count collection={} criteria={}", cb.collection(), cb.criteria());
        Ok(self.matching(cb)?.len())
    }

    pub fn update_many(&self, cb: &CriteriaBuilder) -> Result<usize, DocumentError> {
        debug!("update_many collection={} criteria={} update={}",
               cb.collection(),
               cb.criteria(),
               cb.update_document());
        let mut changes = Vec::with_capacity(cb.modifiers().len());
        for (field, modifier) in cb.modifiers() {
            let path = cb.field_path(field);
            if path == ID_FIELD {
                return Err(DocumentError::ImmutableField(path.to_string()));
            }
            let (Modifier::Set(p) | Modifier::Inc(p)) = modifier;
            let value = cb.parameters()
                          .get(p)
                          .ok_or(DocumentError::MissingParameter(p.get()))?;
            changes.push((path.to_string(), *modifier, value.clone()));
        }

        let targets = self.matching(cb)?;
        let mut collection = self.collections
                                 .get_mut(cb.collection())
                                 .ok_or_else(|| DocumentError::UnknownCollection(cb.collection().to_string()))?;
        // Se valida todo el lote antes de escribir.
        let mut updated = Vec::with_capacity(targets.len());
        for record in &targets {
            let Some(id) = record.id.as_ref().and_then(parse_id) else { continue };
            let Some(fields) = collection.get(&id) else { continue };
            let mut fields = fields.clone();
            for (path, modifier, value) in &changes {
                let next = match modifier {
                    Modifier::Set(_) => value.clone(),
                    Modifier::Inc(_) => {
                        let current = fields.get(path).cloned().unwrap_or(Value::Int(0));
                        current.checked_add(value)
                               .ok_or_else(|| DocumentError::InvalidIncrement { field: path.clone(),
                                                                                reason: format!("{} + {}",
                                                                                                current.type_name(),
                                                                                                value.type_name()) })?
                    }
                };
                fields.insert(path.clone(), next);
            }
            updated.push((id, fields));
        }
        for (id, fields) in updated {
            collection.insert(id, fields);
        }
        Ok(targets.len())
    }

    pub fn delete_many(&self, cb: &CriteriaBuilder) -> Result<usize, DocumentError> {
        debug!("delete_many collection={} criteria={}", cb.collection(), cb.criteria());
        let targets = self.matching(cb)?;
        let mut collection = self.collections
                                 .get_mut(cb.collection())
                                 .ok_or_else(|| DocumentError::UnknownCollection(cb.collection().to_string()))?;
        for id in targets.iter().filter_map(|r| r.id.as_ref().and_then(parse_id)) {
            collection.shift_remove(&id);
        }
        Ok(targets.len())
    }
}

fn parse_id(id: &Value) -> Option<Uuid> {
    match id {
        Value::Uuid(id) => Some(*id),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn persisted_id(record: &Record) -> Result<Uuid, DocumentError> {
    record.id
          .as_ref()
          .and_then(parse_id)
          .ok_or_else(|| DocumentError::NotPersisted(record.model.clone()))
}

fn hydrate(collection: &str, id: Uuid, fields: &IndexMap<String, Value>) -> Record {
    Record { model: collection.to_string(),
             id: Some(Value::Uuid(id)),
             fields: fields.clone() }
}

/// Ausente y `null` van primero en orden ascendente.
fn compare_documents(a: &Record, b: &Record, order: &[(&str, Order)]) -> Ordering {
    for (path, direction) in order {
        let va = field_value(a, path).filter(|v| !v.is_null());
        let vb = field_value(b, path).filter(|v| !v.is_null());
        let ord = match (va, vb) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
        };
        let ord = if *direction == Order::Desc { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
