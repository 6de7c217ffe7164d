//! Resolución de nombres de campo contra el alias raíz del builder.

use crate::errors::{MolinoError, MolinoResult};

/// Separador entre alias y campo (`m.title`).
pub const FIELD_SEPARATOR: char = '.';

/// Califica `field` con el primer alias raíz declarado.
///
/// Un campo que ya contiene `.` se devuelve intacto: quien llama afirma que
/// está completamente calificado. Sin alias raíz un campo simple no puede
/// resolverse y eso es un error de configuración del backend.
pub fn resolve_field(field: &str, root_aliases: &[String], model: &str) -> MolinoResult<String> {
    if field.contains(FIELD_SEPARATOR) {
        return Ok(field.to_string());
    }
    let alias = root_aliases.first()
                            .ok_or_else(|| MolinoError::MissingRootAlias { model: model.to_string() })?;
    Ok(format!("{alias}{FIELD_SEPARATOR}{field}"))
}

/// Quita el prefijo `alias.` si coincide; útil para los runtimes que guardan
/// los campos sin calificar.
pub fn strip_alias<'a>(field: &'a str, alias: &str) -> Option<&'a str> {
    field.strip_prefix(alias).and_then(|rest| rest.strip_prefix(FIELD_SEPARATOR))
}
