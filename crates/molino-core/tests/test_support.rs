#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexMap;
use molino_core::{BaseQuery, BuilderSource, NativeBuilder, ParameterId, Predicate, Value, ROOT_ALIAS};

/// Builder mínimo que sólo registra lo que el traductor emite.
#[derive(Debug, Clone, Default)]
pub struct RecordingBuilder {
    pub entity: Option<String>,
    pub aliases: Vec<String>,
    pub predicates: Vec<Predicate>,
    pub parameters: IndexMap<ParameterId, Value>,
    pub configured: bool,
}

impl NativeBuilder for RecordingBuilder {
    fn root_aliases(&self) -> &[String] {
        &self.aliases
    }
    fn and_where(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }
    fn set_parameter(&mut self, id: ParameterId, value: Value) {
        self.parameters.insert(id, value);
    }
    fn parameter(&self, id: ParameterId) -> Option<&Value> {
        self.parameters.get(&id)
    }
    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Fuente que cuenta cuántos builders se construyeron.
#[derive(Debug, Clone)]
pub struct RecordingSource {
    pub declare_alias: bool,
    pub created: Rc<Cell<usize>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self { declare_alias: true,
               created: Rc::new(Cell::new(0)) }
    }

    /// Variante mal configurada: no declara alias raíz.
    pub fn without_alias() -> Self {
        Self { declare_alias: false,
               ..Self::new() }
    }
}

impl BuilderSource for RecordingSource {
    type Builder = RecordingBuilder;

    fn create_builder(&self, model: &str) -> RecordingBuilder {
        self.created.set(self.created.get() + 1);
        let mut builder = RecordingBuilder { entity: Some(model.to_string()),
                                             ..Default::default() };
        if self.declare_alias {
            builder.aliases.push(ROOT_ALIAS.to_string());
        }
        builder
    }

    fn configure_builder(&self, builder: &mut RecordingBuilder) {
        builder.configured = true;
    }
}

pub fn article_query() -> BaseQuery<RecordingSource> {
    BaseQuery::new(RecordingSource::new(), "Article")
}

pub fn predicate_count(query: &BaseQuery<RecordingSource>) -> usize {
    query.peek_query_builder().map(|b| b.predicates.len()).unwrap_or(0)
}
