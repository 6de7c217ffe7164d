//! Constantes compartidas por los backends.

/// Alias con el que cada builder declara la entidad raíz (`FROM Article m`).
/// Los campos sin calificar se resuelven contra él.
pub const ROOT_ALIAS: &str = "m";
