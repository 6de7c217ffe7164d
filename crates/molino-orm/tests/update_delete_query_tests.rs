
use molino_core::{DeleteQuery, FilterQuery, Molino, MolinoError, NativeBuilder, SelectQuery, UpdateQuery, Value};
use test_support::{load_articles, molino, titles};

#[test]
fn update_shares_parameter_numbering_with_filters() {
    let molino = molino();
    let mut q = molino.create_update_query("Article").unwrap();
    q.filter_equal("is_active", true).unwrap().set("title", "x").unwrap().inc("views", 5).unwrap();
    assert_eq!(q.get_dql(), "UPDATE Article m SET m.title = ?2, m.views = m.views + ?3 WHERE m.is_active = ?1");
    assert_eq!(q.query_builder().parameter_count(), 3);
}

#[test]
fn update_execute_applies_set_and_inc() {
    let molino = molino();
    load_articles(&molino, 4);
    let mut q = molino.create_update_query("Article").unwrap();
    q.filter_in("id", vec![1, 2]).unwrap().set("content", "edited").unwrap().inc("views", 1).unwrap();
    assert_eq!(q.execute().unwrap(), 2);

    let first = molino.find_one_by_id("Article", &Value::Int(2)).unwrap().unwrap();
    assert_eq!(first.get("content"), Some(&Value::from("edited")));
    assert_eq!(first.get("views"), Some(&Value::Int(11)));
    let untouched = molino.find_one_by_id("Article", &Value::Int(3)).unwrap().unwrap();
    assert_eq!(untouched.get("content"), Some(&Value::from("content 2")));
}

#[test]
fn update_inc_on_text_field_fails() {
    let molino = molino();
    load_articles(&molino, 1);
    let mut q = molino.create_update_query("Article").unwrap();
    q.inc("title", 1).unwrap();
    assert!(matches!(q.execute().unwrap_err(), MolinoError::Backend(_)));
}

#[test]
fn update_cannot_assign_primary_key() {
    let molino = molino();
    load_articles(&molino, 1);
    let mut q = molino.create_update_query("Article").unwrap();
    q.set("id", 5).unwrap();
    assert!(matches!(q.execute().unwrap_err(), MolinoError::Backend(_)));
}

#[test]
fn delete_execute_removes_matching_rows() {
    let molino = molino();
    load_articles(&molino, 6);
    let mut q = molino.create_delete_query("Article").unwrap();
    q.filter_like("title", "*3").unwrap();
    assert_eq!(q.get_dql(), "DELETE Article m WHERE m.title LIKE ?1");
    assert_eq!(q.execute().unwrap(), 1);

    let mut remaining = molino.create_select_query("Article").unwrap();
    assert_eq!(remaining.count().unwrap(), 5);
    assert!(!titles(&remaining.all().unwrap()).contains(&"Article 3".to_string()));
}

#[test]
fn delete_without_filters_empties_table() {
    let molino = molino();
    load_articles(&molino, 3);
    let mut q = molino.create_delete_query("Article").unwrap();
    assert_eq!(q.execute().unwrap(), 3);
    assert_eq!(molino.create_select_query("Article").unwrap().count().unwrap(), 0);
}

#[test]
fn failed_increment_leaves_every_row_untouched() {
    let molino = molino();
    let mut articles = load_articles(&molino, 2);
    articles[1].set("views", "text");
    molino.save(&mut articles[1]).unwrap();

    let mut q = molino.create_update_query("Article").unwrap();
    q.inc("views", 5).unwrap();
    assert!(matches!(q.execute().unwrap_err(), MolinoError::Backend(_)));

    let first = molino.find_one_by_id("Article", &Value::Int(1)).unwrap().unwrap();
    assert_eq!(first.get("views"), Some(&Value::Int(0)));
}
