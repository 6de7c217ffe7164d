//! Facade uniforme sobre un backend de persistencia.
//!
//! Las operaciones directas (`create`, `save`, `refresh`, `delete`,
//! `find_one_by_id`) delegan en las primitivas nativas del backend sin lógica
//! de traducción propia. La traducción vive en las queries que devuelven los
//! métodos `create_*_query`.

use crate::errors::MolinoResult;
use crate::query::{DeleteQuery, SelectQuery, UpdateQuery};
use crate::record::Record;
use crate::value::Value;

pub trait Molino {
    type Select: SelectQuery;
    type Update: UpdateQuery;
    type Delete: DeleteQuery;

    /// Nombre estable del backend (`"orm"`, `"document"`).
    fn name(&self) -> &'static str;

    /// Instancia nueva (sin persistir) de un modelo registrado.
    fn create(&self, model: &str) -> MolinoResult<Record>;

    /// Inserta o actualiza; asigna el id si el registro era nuevo.
    fn save(&self, record: &mut Record) -> MolinoResult<()>;

    /// Recarga los campos desde el backend.
    fn refresh(&self, record: &mut Record) -> MolinoResult<()>;

    /// Elimina el registro; queda marcado como nuevo.
    fn delete(&self, record: &mut Record) -> MolinoResult<()>;

    fn create_select_query(&self, model: &str) -> MolinoResult<Self::Select>;

    fn create_update_query(&self, model: &str) -> MolinoResult<Self::Update>;

    fn create_delete_query(&self, model: &str) -> MolinoResult<Self::Delete>;

    fn find_one_by_id(&self, model: &str, id: &Value) -> MolinoResult<Option<Record>>;
}
