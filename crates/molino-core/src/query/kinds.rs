//! Contratos de los tipos de query que expone el facade.

use super::filter::FilterQuery;
use crate::errors::MolinoResult;
use crate::record::Record;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

pub trait SelectQuery: FilterQuery {
    /// Restringe los campos hidratados (el id siempre se incluye).
    fn fields(&mut self, fields: &[&str]) -> MolinoResult<&mut Self>;
    fn sort(&mut self, field: &str, order: Order) -> MolinoResult<&mut Self>;
    fn limit(&mut self, limit: usize) -> &mut Self;
    fn skip(&mut self, skip: usize) -> &mut Self;
    fn all(&mut self) -> MolinoResult<Vec<Record>>;
    fn one(&mut self) -> MolinoResult<Option<Record>>;
    /// Cuenta ignorando `limit` y `skip`.
    fn count(&mut self) -> MolinoResult<usize>;
}

pub trait UpdateQuery: FilterQuery {
    fn set(&mut self, field: &str, value: impl Into<Value>) -> MolinoResult<&mut Self>;
    fn inc(&mut self, field: &str, amount: impl Into<Value>) -> MolinoResult<&mut Self>;
    /// Aplica las asignaciones y devuelve el número de registros afectados.
    fn execute(&mut self) -> MolinoResult<usize>;
}

pub trait DeleteQuery: FilterQuery {
    /// Borra los registros que cumplen los filtros y devuelve cuántos fueron.
    fn execute(&mut self) -> MolinoResult<usize>;
}
