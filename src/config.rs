//! Configuración del backend a partir de variables de entorno.
//! Usa `MOLINO_BACKEND` (`orm` | `document`, por defecto `orm`).

use std::env;
use std::fmt;
use std::str::FromStr;

use dotenvy::dotenv;
use molino_core::{MolinoError, MolinoResult};
use once_cell::sync::Lazy;

pub const BACKEND_VAR: &str = "MOLINO_BACKEND";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Orm,
    Document,
}

impl BackendKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Orm => "orm",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = MolinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orm" => Ok(Self::Orm),
            "document" => Ok(Self::Document),
            other => Err(MolinoError::Config(format!("{BACKEND_VAR}: unknown backend '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MolinoConfig {
    pub backend: BackendKind,
}

impl MolinoConfig {
    pub fn from_env() -> MolinoResult<Self> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MolinoResult<Self> {
        let backend = match lookup(BACKEND_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => BackendKind::default(),
        };
        Ok(Self { backend })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
