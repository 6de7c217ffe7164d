//! Registros de modelo y metadatos de modelos registrados.
//!
//! Un `Record` es la instancia hidratada que los backends devuelven y
//! persisten. Mientras `id` sea `None` el registro se considera nuevo.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub model: String,
    pub id: Option<Value>,
    pub fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into(),
               id: None,
               fields: IndexMap::new() }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Variante consumidora de `set` para construir registros en una sola expresión.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Copia restringida a `names` (el id siempre se conserva).
    pub fn project(&self, names: &[String]) -> Record {
        let fields = self.fields
                         .iter()
                         .filter(|(k, _)| names.iter().any(|n| n == *k))
                         .map(|(k, v)| (k.clone(), v.clone()))
                         .collect();
        Record { model: self.model.clone(),
                 id: self.id.clone(),
                 fields }
    }
}

/// Declaración de un modelo: nombre y campos con su valor por defecto.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetadata {
    pub name: String,
    pub fields: IndexMap<String, Value>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               fields: IndexMap::new() }
    }

    pub fn field(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), default.into());
        self
    }

    /// Registro nuevo con los valores por defecto declarados.
    pub fn instantiate(&self) -> Record {
        Record { model: self.name.clone(),
                 id: None,
                 fields: self.fields.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_uses_declared_defaults() {
        let meta = ModelMetadata::new("Article").field("title", Value::Null).field("views", 0);
        let record = meta.instantiate();
        assert!(record.is_new());
        assert_eq!(record.get("views"), Some(&Value::Int(0)));
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn project_keeps_id_and_selected_fields() {
        let mut record = Record::new("Article").with("title", "a").with("views", 3);
        record.id = Some(Value::Int(7));
        let projected = record.project(&["views".to_string()]);
        assert_eq!(projected.id, Some(Value::Int(7)));
        assert_eq!(projected.fields.len(), 1);
        assert!(projected.get("title").is_none());
    }
}
