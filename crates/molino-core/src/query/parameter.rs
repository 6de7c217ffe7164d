//! Asignación de identificadores de parámetro.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador de un parámetro ligado dentro de una query (`?1`, `?2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParameterId(u64);

impl ParameterId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Placeholder posicional con el que los predicados referencian el valor.
    pub fn placeholder(self) -> String {
        format!("?{}", self.0)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contador por query. Empieza en 0 y cada llamada devuelve el siguiente
/// entero, así ningún predicado de la misma query reutiliza un id.
#[derive(Debug, Clone, Default)]
pub struct ParameterAllocator {
    last: u64,
}

impl ParameterAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ParameterId {
        self.last += 1;
        ParameterId(self.last)
    }

    pub fn last_id(&self) -> Option<ParameterId> {
        (self.last > 0).then_some(ParameterId(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut alloc = ParameterAllocator::new();
        assert_eq!(alloc.last_id(), None);
        assert_eq!(alloc.next_id(), ParameterId::new(1));
        assert_eq!(alloc.next_id(), ParameterId::new(2));
        assert_eq!(alloc.last_id().map(ParameterId::get), Some(2));
    }

    #[test]
    fn cloned_allocator_continues_independently() {
        let mut a = ParameterAllocator::new();
        a.next_id();
        let mut b = a.clone();
        assert_eq!(b.next_id().placeholder(), "?2");
        assert_eq!(a.next_id().placeholder(), "?2");
    }
}
