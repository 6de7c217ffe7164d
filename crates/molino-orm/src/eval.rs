//! Evaluación de predicados con semántica SQL sobre filas en memoria.
//!
//! - `NULL` nunca satisface una comparación (tampoco `<>`, `NOT LIKE` ni
//!   `NOT IN`).
//! - `LIKE` interpreta `%` (cualquier secuencia) y `_` (un carácter).

use std::cmp::Ordering;

use indexmap::IndexMap;
use molino_core::{strip_alias, Comparison, ParameterId, Predicate, Value};

use crate::error::OrmError;

/// Columna reservada para la clave primaria.
pub const ID_COLUMN: &str = "id";

/// Vista de una fila: id + columnas.
pub struct Row<'a> {
    pub id: i64,
    pub columns: &'a IndexMap<String, Value>,
}

impl Row<'_> {
    pub fn get(&self, column: &str) -> Value {
        if column == ID_COLUMN {
            return Value::Int(self.id);
        }
        self.columns.get(column).cloned().unwrap_or(Value::Null)
    }
}

/// Quita el alias raíz de un campo calificado (`m.title` → `title`).
pub fn column_name<'a>(field: &'a str, alias: &str) -> Result<&'a str, OrmError> {
    strip_alias(field, alias).ok_or_else(|| OrmError::UnknownAlias { alias: field.split('.').next().unwrap_or(field).to_string(),
                                                                     field: field.to_string() })
}

pub fn parameter<'a>(parameters: &'a IndexMap<ParameterId, Value>, id: ParameterId) -> Result<&'a Value, OrmError> {
    parameters.get(&id).ok_or(OrmError::MissingParameter(id.get()))
}

/// `true` si la fila cumple todos los predicados (AND).
pub fn matches_all(row: &Row<'_>,
                   predicates: &[Predicate],
                   parameters: &IndexMap<ParameterId, Value>,
                   alias: &str)
                   -> Result<bool, OrmError> {
    for predicate in predicates {
        if !matches(row, predicate, parameters, alias)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn matches(row: &Row<'_>,
               predicate: &Predicate,
               parameters: &IndexMap<ParameterId, Value>,
               alias: &str)
               -> Result<bool, OrmError> {
    let column = column_name(predicate.field(), alias)?;
    let lhs = row.get(column);
    let rhs = parameter(parameters, predicate.parameter())?;
    if lhs.is_null() {
        return Ok(false);
    }
    let result = match predicate {
        Predicate::Compare { comparison, .. } => compare(&lhs, *comparison, rhs),
        Predicate::Membership { negated, .. } => {
            let items = rhs.as_list()
                           .ok_or_else(|| OrmError::InvalidStatement(format!("IN parameter of '{column}' is not a list")))?;
            let found = items.iter().any(|item| lhs.loosely_equals(item));
            found != *negated
        }
    };
    Ok(result)
}

fn compare(lhs: &Value, comparison: Comparison, rhs: &Value) -> bool {
    if rhs.is_null() {
        return false;
    }
    match comparison {
        Comparison::Like | Comparison::NotLike => match (lhs.as_str(), rhs.as_str()) {
            (Some(text), Some(pattern)) => sql_like(text, pattern) == (comparison == Comparison::Like),
            _ => false,
        },
        _ => match lhs.compare(rhs) {
            Some(ord) => match comparison {
                Comparison::Equal => ord == Ordering::Equal,
                Comparison::NotEqual => ord != Ordering::Equal,
                Comparison::Greater => ord == Ordering::Greater,
                Comparison::Less => ord == Ordering::Less,
                Comparison::GreaterEqual => ord != Ordering::Less,
                Comparison::LessEqual => ord != Ordering::Greater,
                Comparison::Like | Comparison::NotLike => false,
            },
            None => false,
        },
    }
}

/// Coincidencia `LIKE` de SQL: `%` cualquier secuencia, `_` exactamente un carácter.
pub fn sql_like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (mut t, mut p) = (0usize, 0usize);
    // Última posición de `%` en el patrón y de texto consumido desde entonces.
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if let Some((bp, bt)) = backtrack {
            p = bp + 1;
            t = bt + 1;
            backtrack = Some((bp, bt + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}
