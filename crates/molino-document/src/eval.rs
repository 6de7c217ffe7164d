//! Evaluación de criterios con semántica documental.
//!
//! - Un campo ausente (o `null`) sólo es igual a `null`; por eso satisface
//!   `$ne`, `$nin` y `$not` frente a cualquier valor no nulo.
//! - `$gt`/`$lt`/`$gte`/`$lte` nunca se cumplen con campos ausentes.
//! - `$regex` sólo se aplica a strings; la regex se compila una vez por
//!   ejecución.

use std::cmp::Ordering;
use std::collections::HashMap;

use molino_core::{Comparison, NativeBuilder, ParameterId, Predicate, Record, Value};
use regex::Regex;
use uuid::Uuid;

use crate::builder::{anchored_pattern, CriteriaBuilder, ID_FIELD};
use crate::error::DocumentError;

/// Valor de `path` en el documento; `None` si el campo no existe.
pub fn field_value<'r>(record: &'r Record, path: &str) -> Option<&'r Value> {
    if path == ID_FIELD {
        return record.id.as_ref();
    }
    record.get(path)
}

/// Igualdad documental: ausente y `null` sólo igualan a `null`, y un id
/// UUID admite su forma textual.
pub fn values_equal(lhs: Option<&Value>, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (None | Some(Value::Null), rhs) => rhs.is_null(),
        (Some(Value::Uuid(id)), Value::String(text)) => text.parse::<Uuid>().map(|t| t == *id).unwrap_or(false),
        (Some(Value::String(text)), Value::Uuid(id)) => text.parse::<Uuid>().map(|t| t == *id).unwrap_or(false),
        (Some(lhs), rhs) => lhs.loosely_equals(rhs),
    }
}

/// Predicados de un `CriteriaBuilder` listos para evaluarse.
pub struct Matcher<'b> {
    builder: &'b CriteriaBuilder,
    patterns: HashMap<ParameterId, Regex>,
}

impl<'b> Matcher<'b> {
    pub fn new(builder: &'b CriteriaBuilder) -> Result<Self, DocumentError> {
        let mut patterns = HashMap::new();
        for predicate in builder.predicates() {
            let Predicate::Compare { comparison, parameter, .. } = predicate else { continue };
            if !comparison.is_like() {
                continue;
            }
            let value = lookup(builder, *parameter)?;
            let pattern = value.as_str()
                               .ok_or_else(|| DocumentError::InvalidPattern { pattern: value.to_string(),
                                                                              reason: "not a string".into() })?;
            let anchored = anchored_pattern(pattern);
            let regex = Regex::new(&anchored).map_err(|e| DocumentError::InvalidPattern { pattern: anchored.clone(),
                                                                                          reason: e.to_string() })?;
            patterns.insert(*parameter, regex);
        }
        Ok(Self { builder, patterns })
    }

    /// `true` si el documento cumple todos los predicados.
    pub fn matches(&self, record: &Record) -> Result<bool, DocumentError> {
        for predicate in self.builder.predicates() {
            if !self.matches_one(record, predicate)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn matches_one(&self, record: &Record, predicate: &Predicate) -> Result<bool, DocumentError> {
        let path = self.builder.field_path(predicate.field());
        let lhs = field_value(record, path);
        let rhs = lookup(self.builder, predicate.parameter())?;
        let result = match predicate {
            Predicate::Membership { negated, .. } => {
                let found = rhs.as_list()
                               .map(|items| items.iter().any(|item| values_equal(lhs, item)))
                               .unwrap_or(false);
                found != *negated
            }
            Predicate::Compare { comparison, parameter, .. } => match comparison {
                Comparison::Equal => values_equal(lhs, rhs),
                Comparison::NotEqual => !values_equal(lhs, rhs),
                Comparison::Like | Comparison::NotLike => {
                    let hit = match (lhs.and_then(Value::as_str), self.patterns.get(parameter)) {
                        (Some(text), Some(regex)) => regex.is_match(text),
                        _ => false,
                    };
                    hit == (*comparison == Comparison::Like)
                }
                ordered => match lhs.and_then(|l| l.compare(rhs)) {
                    Some(ord) => match ordered {
                        Comparison::Greater => ord == Ordering::Greater,
                        Comparison::Less => ord == Ordering::Less,
                        Comparison::GreaterEqual => ord != Ordering::Less,
                        _ => ord != Ordering::Greater,
                    },
                    None => false,
                },
            },
        };
        Ok(result)
    }
}

fn lookup(builder: &CriteriaBuilder, id: ParameterId) -> Result<&Value, DocumentError> {
    builder.parameters().get(&id).ok_or(DocumentError::MissingParameter(id.get()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Record {
        Record::new("Article").with("title", "Hello world").with("views", 10).with("author", Value::Null)
    }

    fn builder(field: &str, comparison: Comparison, value: Value) -> CriteriaBuilder {
        let mut cb = CriteriaBuilder::new("Article", "m");
        cb.set_parameter(ParameterId::new(1), value);
        cb.and_where(Predicate::Compare { field: field.into(),
                                          comparison,
                                          parameter: ParameterId::new(1) });
        cb
    }

    fn eval(field: &str, comparison: Comparison, value: impl Into<Value>) -> bool {
        let cb = builder(field, comparison, value.into());
        Matcher::new(&cb).unwrap().matches(&article()).unwrap()
    }

    #[test]
    fn missing_field_matches_negated_operators() {
        assert!(eval("m.missing", Comparison::NotEqual, "x"));
        assert!(eval("m.missing", Comparison::NotLike, ".*"));
        assert!(!eval("m.missing", Comparison::Equal, "x"));
        assert!(!eval("m.missing", Comparison::Greater, 1));
        assert!(eval("m.author", Comparison::Equal, Value::Null));
    }

    #[test]
    fn regex_is_anchored() {
        assert!(eval("m.title", Comparison::Like, "Hello.*"));
        assert!(!eval("m.title", Comparison::Like, "world"));
        assert!(eval("m.title", Comparison::Like, ".*world"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let cb = builder("m.title", Comparison::Like, Value::from("(.*"));
        assert!(matches!(Matcher::new(&cb).err(), Some(DocumentError::InvalidPattern { .. })));
    }

    #[test]
    fn uuid_ids_compare_with_text() {
        let id = Uuid::new_v4();
        assert!(values_equal(Some(&Value::Uuid(id)), &Value::from(id.to_string())));
        assert!(!values_equal(Some(&Value::Uuid(id)), &Value::from("nope")));
    }

    #[test]
    fn ordered_comparisons() {
        assert!(eval("m.views", Comparison::GreaterEqual, 10));
        assert!(eval("m.views", Comparison::Less, 10.5));
        assert!(!eval("m.views", Comparison::Greater, "10"));
    }
}
