//! `CriteriaBuilder`: builder nativo del backend documental.
//!
//! Registra predicados sobre una colección con alias raíz `m` y los
//! renderiza como documento de criterios estilo Mongo:
//!
//! ```text
//! { "title": { "$eq": "foo" }, "views": { "$in": [1, 2] } }
//! ```
//!
//! El alias es interno: al renderizar y al evaluar se quita el prefijo `m.`.
//! El comodín LIKE es `.*` dentro de una regex anclada `^…$`.

use indexmap::IndexMap;
use molino_core::{strip_alias, Comparison, NativeBuilder, Order, ParameterId, Predicate, Value};
use serde_json::{json, Map};

/// Campo reservado para el id de los documentos.
pub const ID_FIELD: &str = "id";
/// Nombre con el que se renderiza `ID_FIELD` en los criterios.
pub const RENDERED_ID_FIELD: &str = "_id";

/// Modificador de una update query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Set(ParameterId),
    Inc(ParameterId),
}

#[derive(Debug, Clone)]
pub struct CriteriaBuilder {
    collection: String,
    aliases: Vec<String>,
    predicates: Vec<Predicate>,
    parameters: IndexMap<ParameterId, Value>,
    projection: Option<Vec<String>>,
    sort: Vec<(String, Order)>,
    limit: Option<usize>,
    skip: Option<usize>,
    modifiers: Vec<(String, Modifier)>,
}

impl CriteriaBuilder {
    pub fn new(collection: &str, alias: &str) -> Self {
        Self { collection: collection.to_string(),
               aliases: vec![alias.to_string()],
               predicates: Vec::new(),
               parameters: IndexMap::new(),
               projection: None,
               sort: Vec::new(),
               limit: None,
               skip: None,
               modifiers: Vec::new() }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Ruta del campo dentro del documento (`m.title` → `title`).
    ///
    /// Un prefijo distinto del alias raíz se conserva: se interpreta como
    /// ruta anidada del documento.
    pub fn field_path<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find_map(|alias| strip_alias(field, alias))
            .unwrap_or(field)
    }

    pub fn project(&mut self, fields: Vec<String>) -> &mut Self {
        self.projection = Some(fields);
        self
    }

    pub fn sort(&mut self, field: String, order: Order) -> &mut Self {
        self.sort.push((field, order));
        self
    }

    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(&mut self, skip: usize) -> &mut Self {
        self.skip = Some(skip);
        self
    }

    pub fn modify(&mut self, field: String, modifier: Modifier) -> &mut Self {
        self.modifiers.push((field, modifier));
        self
    }

    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    pub fn sort_fields(&self) -> &[(String, Order)] {
        &self.sort
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub fn skip_value(&self) -> Option<usize> {
        self.skip
    }

    pub fn modifiers(&self) -> &[(String, Modifier)] {
        &self.modifiers
    }

    pub fn parameters(&self) -> &IndexMap<ParameterId, Value> {
        &self.parameters
    }

    fn rendered_path(&self, field: &str) -> String {
        match self.field_path(field) {
            ID_FIELD => RENDERED_ID_FIELD.to_string(),
            path => path.to_string(),
        }
    }

    fn rendered_parameter(&self, id: ParameterId) -> serde_json::Value {
        self.parameters.get(&id).map(Value::to_json).unwrap_or(serde_json::Value::Null)
    }

    fn render_predicate(&self, predicate: &Predicate) -> serde_json::Value {
        let value = self.rendered_parameter(predicate.parameter());
        match predicate {
            Predicate::Compare { comparison, .. } => match comparison {
                Comparison::Like => json!({ "$regex": anchored(&value) }),
                Comparison::NotLike => json!({ "$not": { "$regex": anchored(&value) } }),
                other => entry(operator(*other), value),
            },
            Predicate::Membership { negated: false, .. } => json!({ "$in": value }),
            Predicate::Membership { negated: true, .. } => json!({ "$nin": value }),
        }
    }

    /// Documento de criterios. Si un campo aparece en más de un predicado
    /// se usa `$and` para no perder condiciones.
    pub fn criteria(&self) -> serde_json::Value {
        let mut doc = Map::new();
        let mut repeated = false;
        for predicate in &self.predicates {
            let path = self.rendered_path(predicate.field());
            if doc.contains_key(&path) {
                repeated = true;
                break;
            }
            doc.insert(path, self.render_predicate(predicate));
        }
        if !repeated {
            return serde_json::Value::Object(doc);
        }
        let clauses: Vec<serde_json::Value> =
            self.predicates
                .iter()
                .map(|p| entry(&self.rendered_path(p.field()), self.render_predicate(p)))
                .collect();
        json!({ "$and": clauses })
    }

    /// Documento de modificación (`$set` / `$inc`).
    pub fn update_document(&self) -> serde_json::Value {
        let mut set = Map::new();
        let mut inc = Map::new();
        for (field, modifier) in &self.modifiers {
            let path = self.rendered_path(field);
            match modifier {
                Modifier::Set(p) => set.insert(path, self.rendered_parameter(*p)),
                Modifier::Inc(p) => inc.insert(path, self.rendered_parameter(*p)),
            };
        }
        let mut doc = Map::new();
        if !set.is_empty() {
            doc.insert("$set".into(), serde_json::Value::Object(set));
        }
        if !inc.is_empty() {
            doc.insert("$inc".into(), serde_json::Value::Object(inc));
        }
        serde_json::Value::Object(doc)
    }
}

fn operator(comparison: Comparison) -> &'static str {
    match comparison {
        Comparison::Equal => "$eq",
        Comparison::NotEqual => "$ne",
        Comparison::Greater => "$gt",
        Comparison::Less => "$lt",
        Comparison::GreaterEqual => "$gte",
        Comparison::LessEqual => "$lte",
        Comparison::Like | Comparison::NotLike => "$regex",
    }
}

fn entry(key: &str, value: serde_json::Value) -> serde_json::Value {
    let mut doc = Map::new();
    doc.insert(key.to_string(), value);
    serde_json::Value::Object(doc)
}

/// `^patrón$` para el valor LIKE ya traducido.
pub fn anchored_pattern(pattern: &str) -> String {
    format!("^{pattern}$")
}

fn anchored(value: &serde_json::Value) -> serde_json::Value {
    match value.as_str() {
        Some(pattern) => serde_json::Value::String(anchored_pattern(pattern)),
        None => value.clone(),
    }
}

impl NativeBuilder for CriteriaBuilder {
    const LIKE_WILDCARD: &'static str = ".*";

    fn root_aliases(&self) -> &[String] {
        &self.aliases
    }

    fn and_where(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    fn set_parameter(&mut self, id: ParameterId, value: Value) {
        self.parameters.insert(id, value);
    }

    fn parameter(&self, id: ParameterId) -> Option<&Value> {
        self.parameters.get(&id)
    }

    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}
