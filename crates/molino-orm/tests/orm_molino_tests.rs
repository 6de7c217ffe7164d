
use molino_core::{FilterQuery, Molino, MolinoError, Value};
use test_support::{load_articles, molino};

#[test]
fn name_is_orm() {
    assert_eq!(molino().name(), "orm");
}

#[test]
fn create_returns_new_record_with_defaults() {
    let molino = molino();
    let article = molino.create("Article").unwrap();
    assert!(article.is_new());
    assert_eq!(article.get("views"), Some(&Value::Int(0)));
}

#[test]
fn create_unknown_model_fails() {
    let err = molino().create("Nope").unwrap_err();
    assert_eq!(err, MolinoError::UnknownModel("Nope".into()));
}

#[test]
fn save_assigns_incremental_ids() {
    let molino = molino();
    let articles = load_articles(&molino, 3);
    let ids: Vec<_> = articles.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, vec![Some(Value::Int(1)), Some(Value::Int(2)), Some(Value::Int(3))]);
    assert!(articles.iter().all(|a| !a.is_new()));
}

#[test]
fn explicit_id_is_never_reused_by_auto_increment() {
    let molino = molino();
    let mut explicit = molino.create("Article").unwrap();
    explicit.id = Some(Value::Int(1));
    explicit.set("title", "explicit");
    molino.save(&mut explicit).unwrap();

    let mut generated = molino.create("Article").unwrap();
    generated.set("title", "auto");
    molino.save(&mut generated).unwrap();

    assert_eq!(generated.id, Some(Value::Int(2)));
    let first = molino.find_one_by_id("Article", &Value::Int(1)).unwrap().unwrap();
    assert_eq!(first.get("title"), Some(&Value::from("explicit")));
}

#[test]
fn save_existing_record_updates_row() {
    let molino = molino();
    let mut article = load_articles(&molino, 1).remove(0);
    article.set("title", "changed");
    molino.save(&mut article).unwrap();
    let found = molino.find_one_by_id("Article", article.id.as_ref().unwrap()).unwrap().unwrap();
    assert_eq!(found.get("title"), Some(&Value::from("changed")));
}

#[test]
fn refresh_reloads_fields() {
    let molino = molino();
    let mut article = load_articles(&molino, 1).remove(0);
    article.set("title", "local edit");
    molino.refresh(&mut article).unwrap();
    assert_eq!(article.get("title"), Some(&Value::from("Article 0")));
}

#[test]
fn refresh_and_delete_require_persisted_record() {
    let molino = molino();
    let mut article = molino.create("Article").unwrap();
    assert_eq!(molino.refresh(&mut article).unwrap_err(),
               MolinoError::NotPersisted { model: "Article".into() });
    assert_eq!(molino.delete(&mut article).unwrap_err(),
               MolinoError::NotPersisted { model: "Article".into() });
}

#[test]
fn delete_removes_record() {
    let molino = molino();
    let mut article = load_articles(&molino, 1).remove(0);
    let id = article.id.clone().unwrap();
    molino.delete(&mut article).unwrap();
    assert!(article.is_new());
    assert!(molino.find_one_by_id("Article", &id).unwrap().is_none());
}

#[test]
fn find_one_by_id_returns_matching_record() {
    let molino = molino();
    let articles = load_articles(&molino, 10);
    assert_eq!(molino.find_one_by_id("Article", articles[2].id.as_ref().unwrap()).unwrap().as_ref(),
               Some(&articles[2]));
    assert_eq!(molino.find_one_by_id("Article", articles[5].id.as_ref().unwrap()).unwrap().as_ref(),
               Some(&articles[5]));
    assert!(molino.find_one_by_id("Article", &Value::from("no")).unwrap().is_none());
}

#[test]
fn create_queries_for_registered_models_only() {
    let molino = molino();
    let select = molino.create_select_query("Article").unwrap();
    assert_eq!(select.model(), "Article");
    assert!(!select.base().has_query_builder());
    assert!(molino.create_update_query("Article").is_ok());
    assert!(molino.create_delete_query("Article").is_ok());
    assert_eq!(molino.create_select_query("Nope").unwrap_err(), MolinoError::UnknownModel("Nope".into()));
}
