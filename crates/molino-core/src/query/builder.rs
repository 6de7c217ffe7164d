//! Contrato del builder nativo de cada backend.
//!
//! El algoritmo de traducción (`BaseQuery`) sólo conoce este trait: declarar
//! alias raíz, añadir predicados que referencian un placeholder y ligar el
//! valor de ese placeholder. Cómo se renderiza o ejecuta cada predicado es
//! asunto del backend.

use std::fmt;

use serde::Serialize;

use super::parameter::ParameterId;
use crate::value::Value;

/// Operadores binarios que un filtro puede emitir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    Equal,
    NotEqual,
    Like,
    NotLike,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
}

impl Comparison {
    pub fn operator(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
        }
    }

    pub fn is_like(self) -> bool {
        matches!(self, Self::Like | Self::NotLike)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

/// Predicado ya calificado y ligado a un parámetro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `<field> <op> ?<id>`
    Compare { field: String, comparison: Comparison, parameter: ParameterId },
    /// `<field> IN(?<id>)` / `<field> NOT IN(?<id>)`; el parámetro es una lista.
    Membership { field: String, parameter: ParameterId, negated: bool },
}

impl Predicate {
    pub fn field(&self) -> &str {
        match self {
            Self::Compare { field, .. } | Self::Membership { field, .. } => field,
        }
    }

    pub fn parameter(&self) -> ParameterId {
        match self {
            Self::Compare { parameter, .. } | Self::Membership { parameter, .. } => *parameter,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { field, comparison, parameter } => {
                write!(f, "{field} {comparison} {}", parameter.placeholder())
            }
            Self::Membership { field, parameter, negated } => {
                let op = if *negated { "NOT IN" } else { "IN" };
                write!(f, "{field} {op}({})", parameter.placeholder())
            }
        }
    }
}

/// Builder mutable propio de un backend.
///
/// `Clone` debe ser una copia profunda: las queries clonadas no pueden
/// compartir predicados ni parámetros.
pub trait NativeBuilder: Clone + fmt::Debug {
    /// Token nativo que sustituye al comodín `*` en los valores LIKE.
    const LIKE_WILDCARD: &'static str = "%";

    /// Alias raíz declarados, en orden de declaración.
    fn root_aliases(&self) -> &[String];

    /// Añade un predicado combinado con AND con todos los anteriores.
    fn and_where(&mut self, predicate: Predicate);

    fn set_parameter(&mut self, id: ParameterId, value: Value);

    fn parameter(&self, id: ParameterId) -> Option<&Value>;

    fn predicates(&self) -> &[Predicate];

    fn parameter_count(&self) -> usize;
}
