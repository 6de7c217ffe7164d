#![allow(dead_code)]

use molino_core::{Molino, ModelMetadata, Record, Value};
use molino_document::DocumentMolino;

pub fn molino() -> DocumentMolino {
    let molino = DocumentMolino::default();
    molino.register_model(ModelMetadata::new("Article").field("title", Value::Null)
                                                       .field("views", 0)
                                                       .field("tags", Value::Null));
    molino
}

/// Guarda `n` artículos `Article 0..n` con `views = i`; los pares no tienen `tags`.
pub fn load_articles(molino: &DocumentMolino, n: usize) -> Vec<Record> {
    (0..n).map(|i| {
              let mut article = molino.create("Article").expect("registered model");
              article.set("title", format!("Article {i}")).set("views", i as i64);
              if i % 2 == 0 {
                  article.fields.shift_remove("tags");
              } else {
                  article.set("tags", "odd");
              }
              molino.save(&mut article).expect("save article");
              article
          })
          .collect()
}

pub fn titles(records: &[Record]) -> Vec<String> {
    records.iter()
           .filter_map(|r| r.get("title").and_then(|v| v.as_str()).map(str::to_string))
           .collect()
}
