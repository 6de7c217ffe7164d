//! `QueryBuilder` relacional (estilo DQL).
//!
//! Acumula las partes de una sentencia SELECT / UPDATE / DELETE sobre una
//! entidad raíz con alias, más el mapa de parámetros posicionales. El texto
//! DQL es sólo una vista: el `EntityManager` ejecuta sobre las partes
//! estructuradas.

use std::fmt::Write as _;

use indexmap::IndexMap;
use molino_core::{NativeBuilder, Order, ParameterId, Predicate, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    #[default]
    Select,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    pub entity: String,
    pub alias: String,
}

/// Lado derecho de una asignación `SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetExpr {
    /// `field = ?id`
    Assign(ParameterId),
    /// `field = field + ?id`
    Increment(ParameterId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    pub field: String,
    pub expr: SetExpr,
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    kind: StatementKind,
    from: Vec<FromClause>,
    aliases: Vec<String>,
    partial_fields: Option<Vec<String>>,
    where_parts: Vec<Predicate>,
    set_parts: Vec<SetClause>,
    order_by: Vec<(String, Order)>,
    first_result: Option<usize>,
    max_results: Option<usize>,
    parameters: IndexMap<ParameterId, Value>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declara una entidad raíz con su alias.
    pub fn from(&mut self, entity: &str, alias: &str) -> &mut Self {
        self.from.push(FromClause { entity: entity.to_string(),
                                    alias: alias.to_string() });
        self.aliases.push(alias.to_string());
        self
    }

    pub fn select(&mut self) -> &mut Self {
        self.kind = StatementKind::Select;
        self
    }

    pub fn update(&mut self) -> &mut Self {
        self.kind = StatementKind::Update;
        self
    }

    pub fn delete(&mut self) -> &mut Self {
        self.kind = StatementKind::Delete;
        self
    }

    /// Hidratación parcial: sólo estos campos (sin calificar) más el id.
    pub fn select_partial(&mut self, fields: Vec<String>) -> &mut Self {
        self.partial_fields = Some(fields);
        self
    }

    pub fn set(&mut self, field: String, parameter: ParameterId) -> &mut Self {
        self.set_parts.push(SetClause { field,
                                        expr: SetExpr::Assign(parameter) });
        self
    }

    pub fn increment(&mut self, field: String, parameter: ParameterId) -> &mut Self {
        self.set_parts.push(SetClause { field,
                                        expr: SetExpr::Increment(parameter) });
        self
    }

    pub fn add_order_by(&mut self, field: String, order: Order) -> &mut Self {
        self.order_by.push((field, order));
        self
    }

    pub fn set_first_result(&mut self, first: usize) -> &mut Self {
        self.first_result = Some(first);
        self
    }

    pub fn set_max_results(&mut self, max: usize) -> &mut Self {
        self.max_results = Some(max);
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn root(&self) -> Option<&FromClause> {
        self.from.first()
    }

    pub fn partial_fields(&self) -> Option<&[String]> {
        self.partial_fields.as_deref()
    }

    pub fn where_parts(&self) -> &[Predicate] {
        &self.where_parts
    }

    pub fn set_parts(&self) -> &[SetClause] {
        &self.set_parts
    }

    pub fn order_by(&self) -> &[(String, Order)] {
        &self.order_by
    }

    pub fn first_result(&self) -> Option<usize> {
        self.first_result
    }

    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    pub fn parameters(&self) -> &IndexMap<ParameterId, Value> {
        &self.parameters
    }

    /// Texto DQL de la sentencia acumulada.
    pub fn get_dql(&self) -> String {
        let mut dql = String::new();
        let root = self.from
                       .iter()
                       .map(|f| format!("{} {}", f.entity, f.alias))
                       .collect::<Vec<_>>()
                       .join(", ");
        match self.kind {
            StatementKind::Select => {
                let alias = self.aliases.first().map(String::as_str).unwrap_or("");
                match &self.partial_fields {
                    Some(fields) if fields.is_empty() => {
                        let _ = write!(dql, "SELECT partial {alias}.{{id}} FROM {root}");
                    }
                    Some(fields) => {
                        let _ = write!(dql, "SELECT partial {alias}.{{id,{}}} FROM {root}", fields.join(","));
                    }
                    None => {
                        let _ = write!(dql, "SELECT {alias} FROM {root}");
                    }
                }
            }
            StatementKind::Update => {
                let _ = write!(dql, "UPDATE {root}");
                if !self.set_parts.is_empty() {
                    let sets: Vec<String> = self.set_parts
                                                .iter()
                                                .map(|s| match s.expr {
                                                    SetExpr::Assign(p) => format!("{} = {}", s.field, p.placeholder()),
                                                    SetExpr::Increment(p) => format!("{0} = {0} + {1}", s.field, p.placeholder()),
                                                })
                                                .collect();
                    let _ = write!(dql, " SET {}", sets.join(", "));
                }
            }
            StatementKind::Delete => {
                let _ = write!(dql, "DELETE {root}");
            }
        }
        if !self.where_parts.is_empty() {
            let conditions: Vec<String> = self.where_parts.iter().map(|p| p.to_string()).collect();
            let _ = write!(dql, " WHERE {}", conditions.join(" AND "));
        }
        if self.kind == StatementKind::Select && !self.order_by.is_empty() {
            let orders: Vec<String> = self.order_by
                                          .iter()
                                          .map(|(field, order)| format!("{field} {}", order.keyword()))
                                          .collect();
            let _ = write!(dql, " ORDER BY {}", orders.join(", "));
        }
        dql
    }
}

impl NativeBuilder for QueryBuilder {
    fn root_aliases(&self) -> &[String] {
        &self.aliases
    }

    fn and_where(&mut self, predicate: Predicate) {
        self.where_parts.push(predicate);
    }

    fn set_parameter(&mut self, id: ParameterId, value: Value) {
        self.parameters.insert(id, value);
    }

    fn parameter(&self, id: ParameterId) -> Option<&Value> {
        self.parameters.get(&id)
    }

    fn predicates(&self) -> &[Predicate] {
        &self.where_parts
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}
