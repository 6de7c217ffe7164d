//! Operaciones de filtro agnósticas al backend.
//!
//! `FilterQuery` expone la API fluida. Cada tipo de query sólo implementa
//! `apply_filter` (normalmente delegando en su `BaseQuery`); el resto son
//! métodos por defecto que devuelven la misma instancia para encadenar.

use super::builder::Comparison;
use crate::errors::MolinoResult;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    NotEqual,
    Like,
    NotLike,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    In,
    NotIn,
}

impl FilterOp {
    /// Nombre de la operación pública, usado en los errores.
    pub fn name(self) -> &'static str {
        match self {
            Self::Equal => "filter_equal",
            Self::NotEqual => "filter_not_equal",
            Self::Like => "filter_like",
            Self::NotLike => "filter_not_like",
            Self::Greater => "filter_greater",
            Self::Less => "filter_less",
            Self::GreaterEqual => "filter_greater_equal",
            Self::LessEqual => "filter_less_equal",
            Self::In => "filter_in",
            Self::NotIn => "filter_not_in",
        }
    }

    /// Operador binario equivalente; `None` para las operaciones de pertenencia.
    pub fn comparison(self) -> Option<Comparison> {
        match self {
            Self::Equal => Some(Comparison::Equal),
            Self::NotEqual => Some(Comparison::NotEqual),
            Self::Like => Some(Comparison::Like),
            Self::NotLike => Some(Comparison::NotLike),
            Self::Greater => Some(Comparison::Greater),
            Self::Less => Some(Comparison::Less),
            Self::GreaterEqual => Some(Comparison::GreaterEqual),
            Self::LessEqual => Some(Comparison::LessEqual),
            Self::In | Self::NotIn => None,
        }
    }
}

/// Una llamada de filtro tal como la hizo la aplicación, sin traducir.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self { field: field.into(),
               op,
               value: value.into() }
    }
}

pub trait FilterQuery: Sized {
    /// Nombre del modelo al que apunta la query.
    fn model(&self) -> &str;

    /// Traduce `filter` al builder nativo de la query.
    fn apply_filter(&mut self, filter: Filter) -> MolinoResult<()>;

    fn filter(&mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.apply_filter(Filter::new(field, op, value))?;
        Ok(self)
    }

    fn filter_equal(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::Equal, value)
    }

    fn filter_not_equal(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::NotEqual, value)
    }

    /// `pattern` usa `*` como comodín.
    fn filter_like(&mut self, field: &str, pattern: &str) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::Like, pattern)
    }

    fn filter_not_like(&mut self, field: &str, pattern: &str) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::NotLike, pattern)
    }

    fn filter_greater(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::Greater, value)
    }

    fn filter_less(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::Less, value)
    }

    fn filter_greater_equal(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::GreaterEqual, value)
    }

    fn filter_less_equal(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::LessEqual, value)
    }

    /// `values` debe convertirse en `Value::List`; se liga como un único parámetro.
    fn filter_in(&mut self, field: &str, values: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::In, values)
    }

    fn filter_not_in(&mut self, field: &str, values: impl Into<Value>) -> MolinoResult<&mut Self> {
        self.filter(field, FilterOp::NotIn, values)
    }
}
