//! `EntityManager` en memoria: runtime del backend relacional.
//!
//! Guarda una tabla por entidad registrada, con ids autoincrementales, y
//! ejecuta las sentencias que acumula un `QueryBuilder`. No gestiona
//! transacciones, sesiones ni conexiones.

use std::cmp::Ordering;

use dashmap::DashMap;
use indexmap::IndexMap;
use log::{debug, trace};
use molino_core::{ModelMetadata, Order, Record, Value};

use crate::builder::{QueryBuilder, SetExpr, StatementKind};
use crate::error::OrmError;
use crate::eval::{column_name, matches_all, parameter, Row, ID_COLUMN};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: IndexMap<i64, IndexMap<String, Value>>,
}

#[derive(Debug, Default)]
pub struct EntityManager {
    metadata: DashMap<String, ModelMetadata>,
    tables: DashMap<String, Table>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) la metadata de una entidad y crea su tabla.
    pub fn register(&self, metadata: ModelMetadata) {
        debug!("register entity={}", metadata.name);
        self.tables.entry(metadata.name.clone()).or_default();
        self.metadata.insert(metadata.name.clone(), metadata);
    }

    pub fn is_registered(&self, entity: &str) -> bool {
        self.metadata.contains_key(entity)
    }

    pub fn create_query_builder(&self) -> QueryBuilder {
        QueryBuilder::new()
    }

    pub fn instantiate(&self, entity: &str) -> Result<Record, OrmError> {
        self.metadata
            .get(entity)
            .map(|m| m.instantiate())
            .ok_or_else(|| OrmError::UnknownEntity(entity.to_string()))
    }

    /// INSERT si el registro es nuevo, UPDATE en caso contrario.
    pub fn persist(&self, record: &mut Record) -> Result<(), OrmError> {
        let mut table = self.tables
                            .get_mut(&record.model)
                            .ok_or_else(|| OrmError::UnknownEntity(record.model.clone()))?;
        let id = match &record.id {
            Some(Value::Int(id)) => {
                table.last_id = table.last_id.max(*id);
                *id
            }
            Some(other) => return Err(OrmError::InvalidStatement(format!("invalid id {other} for {}", record.model))),
            None => {
                table.last_id += 1;
                table.last_id
            }
        };
        table.rows.insert(id, record.fields.clone());
        record.id = Some(Value::Int(id));
        trace!("persist entity={} id={id}", record.model);
        Ok(())
    }

    pub fn refresh(&self, record: &mut Record) -> Result<(), OrmError> {
        let id = persisted_id(record)?;
        let table = self.tables
                        .get(&record.model)
                        .ok_or_else(|| OrmError::UnknownEntity(record.model.clone()))?;
        let columns = table.rows.get(&id).ok_or_else(|| OrmError::NotPersisted(record.model.clone()))?;
        record.fields = columns.clone();
        Ok(())
    }

    pub fn remove(&self, record: &mut Record) -> Result<(), OrmError> {
        let id = persisted_id(record)?;
        let mut table = self.tables
                            .get_mut(&record.model)
                            .ok_or_else(|| OrmError::UnknownEntity(record.model.clone()))?;
        table.rows.shift_remove(&id);
        record.id = None;
        trace!("remove entity={} id={id}", record.model);
        Ok(())
    }

    pub fn find(&self, entity: &str, id: &Value) -> Result<Option<Record>, OrmError> {
        let table = self.tables
                        .get(entity)
                        .ok_or_else(|| OrmError::UnknownEntity(entity.to_string()))?;
        let Value::Int(id) = id else {
            return Ok(None);
        };
        Ok(table.rows.get(id).map(|columns| hydrate(entity, *id, columns)))
    }

    /// Ids que cumplen los predicados, en orden de inserción.
    fn matching_ids(&self, qb: &QueryBuilder) -> Result<(String, String, Vec<i64>), OrmError> {
        let root = qb.root()
                     .ok_or_else(|| OrmError::InvalidStatement("query builder has no FROM clause".into()))?;
        let table = self.tables
                        .get(&root.entity)
                        .ok_or_else(|| OrmError::UnknownEntity(root.entity.clone()))?;
        let mut ids = Vec::new();
        for (id, columns) in &table.rows {
            let row = Row { id: *id, columns };
            if matches_all(&row, qb.where_parts(), qb.parameters(), &root.alias)? {
                ids.push(*id);
            }
        }
        Ok((root.entity.clone(), root.alias.clone(), ids))
    }

    pub fn execute_select(&self, qb: &QueryBuilder) -> Result<Vec<Record>, OrmError> {
        if qb.kind() != StatementKind::Select {
            return Err(OrmError::InvalidStatement(format!("expected SELECT, got {:?}", qb.kind())));
        }
        debug!("execute_select dql={}", qb.get_dql());
        let (entity, alias, ids) = self.matching_ids(qb)?;
        let table = self.tables
                        .get(&entity)
                        .ok_or_else(|| OrmError::UnknownEntity(entity.clone()))?;
        let mut records: Vec<Record> = ids.iter()
                                          .filter_map(|id| table.rows.get(id).map(|c| hydrate(&entity, *id, c)))
                                          .collect();
        drop(table);

        let mut order = Vec::with_capacity(qb.order_by().len());
        for (field, direction) in qb.order_by() {
            order.push((column_name(field, &alias)?.to_string(), *direction));
        }
        if !order.is_empty() {
            records.sort_by(|a, b| compare_records(a, b, &order));
        }

        let skip = qb.first_result().unwrap_or(0);
        let take = qb.max_results().unwrap_or(usize::MAX);
        let page = records.into_iter().skip(skip).take(take);
        Ok(match qb.partial_fields() {
            Some(fields) => page.map(|r| r.project(fields)).collect(),
            None => page.collect(),
        })
    }

    pub fn execute_count(&self, qb: &QueryBuilder) -> Result<usize, OrmError> {
        debug!("execute_count dql={}", qb.get_dql());
        let (_, _, ids) = self.matching_ids(qb)?;
        Ok(ids.len())
    }

    pub fn execute_update(&self, qb: &QueryBuilder) -> Result<usize, OrmError> {
        if qb.kind() != StatementKind::Update {
            return Err(OrmError::InvalidStatement(format!("expected UPDATE, got {:?}", qb.kind())));
        }
        debug!("execute_update dql={}", qb.get_dql());
        let (entity, alias, ids) = self.matching_ids(qb)?;
        let mut assignments = Vec::with_capacity(qb.set_parts().len());
        for clause in qb.set_parts() {
            let column = column_name(&clause.field, &alias)?;
            if column == ID_COLUMN {
                return Err(OrmError::InvalidStatement("cannot assign the primary key".into()));
            }
            assignments.push((column.to_string(), clause.expr));
        }

        let mut table = self.tables
                            .get_mut(&entity)
                            .ok_or_else(|| OrmError::UnknownEntity(entity.clone()))?;
        // Todas las filas nuevas se calculan antes de escribir ninguna.
        let mut updated = Vec::with_capacity(ids.len());
        for id in &ids {
            let Some(columns) = table.rows.get(id) else { continue };
            let mut columns = columns.clone();
            for (column, expr) in &assignments {
                let value = match expr {
                    SetExpr::Assign(p) => parameter(qb.parameters(), *p)?.clone(),
                    SetExpr::Increment(p) => {
                        let amount = parameter(qb.parameters(), *p)?;
                        let current = columns.get(column).cloned().unwrap_or(Value::Int(0));
                        current.checked_add(amount)
                               .ok_or_else(|| OrmError::InvalidIncrement { field: column.clone(),
                                                                           reason: format!("{} + {}",
                                                                                           current.type_name(),
                                                                                           amount.type_name()) })?
                    }
                };
                columns.insert(column.clone(), value);
            }
            updated.push((*id, columns));
        }
        for (id, columns) in updated {
            table.rows.insert(id, columns);
        }
        Ok(ids.len())
    }

    pub fn execute_delete(&self, qb: &QueryBuilder) -> Result<usize, OrmError> {
        if qb.kind() != StatementKind::Delete {
            return Err(OrmError::InvalidStatement(format!("expected DELETE, got {:?}", qb.kind())));
        }
        debug!("execute_delete dql={}", qb.get_dql());
        let (entity, _, ids) = self.matching_ids(qb)?;
        let mut table = self.tables
                            .get_mut(&entity)
                            .ok_or_else(|| OrmError::UnknownEntity(entity.clone()))?;
        for id in &ids {
            table.rows.shift_remove(id);
        }
        Ok(ids.len())
    }
}

fn persisted_id(record: &Record) -> Result<i64, OrmError> {
    match &record.id {
        Some(Value::Int(id)) => Ok(*id),
        _ => Err(OrmError::NotPersisted(record.model.clone())),
    }
}

fn hydrate(entity: &str, id: i64, columns: &IndexMap<String, Value>) -> Record {
    Record { model: entity.to_string(),
             id: Some(Value::Int(id)),
             fields: columns.clone() }
}

fn record_value(record: &Record, column: &str) -> Value {
    if column == ID_COLUMN {
        return record.id.clone().unwrap_or(Value::Null);
    }
    record.get(column).cloned().unwrap_or(Value::Null)
}

/// NULL primero en ASC; tipos incomparables se consideran iguales.
fn compare_records(a: &Record, b: &Record, order: &[(String, Order)]) -> Ordering {
    for (column, direction) in order {
        let (va, vb) = (record_value(a, column), record_value(b, column));
        let ord = match (va.is_null(), vb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => va.compare(&vb).unwrap_or(Ordering::Equal),
        };
        let ord = if *direction == Order::Desc { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
