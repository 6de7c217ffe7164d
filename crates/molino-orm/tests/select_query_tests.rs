
use molino_core::{FilterQuery, Molino, MolinoError, NativeBuilder, Order, SelectQuery, Value};
use test_support::{load_articles, molino, titles};

#[test]
fn configure_hook_builds_select_statement() {
    let molino = molino();
    let mut query = molino.create_select_query("Article").unwrap();
    assert_eq!(query.get_dql(), "SELECT m FROM Article m");
    assert_eq!(query.query_builder().root_aliases(), ["m".to_string()]);
}

#[test]
fn filters_render_parameterized_dql() {
    let molino = molino();
    let mut query = molino.create_select_query("Article").unwrap();
    query.filter_equal("title", "foo")
         .unwrap()
         .filter_like("content", "*bar*")
         .unwrap()
         .filter_in("id", vec![1, 2, 3])
         .unwrap()
         .filter_not_in("m.views", vec![0])
         .unwrap();
    assert_eq!(query.get_dql(),
               "SELECT m FROM Article m WHERE m.title = ?1 AND m.content LIKE ?2 AND m.id IN(?3) AND m.views NOT IN(?4)");
    let qb = query.query_builder();
    assert_eq!(qb.parameter_count(), 4);
    assert_eq!(qb.parameters().get_index(1).map(|(_, v)| v.clone()), Some(Value::from("%bar%")));
}

#[test]
fn comparison_filters_select_matching_rows() {
    let molino = molino();
    load_articles(&molino, 10);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_greater("views", 20).unwrap().filter_less_equal("views", 50).unwrap();
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 3", "Article 4", "Article 5"]);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_greater_equal("views", 80).unwrap();
    assert_eq!(q.count().unwrap(), 2);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_less("views", 10).unwrap();
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 0"]);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_not_equal("is_active", true).unwrap();
    assert_eq!(q.count().unwrap(), 5);
}

#[test]
fn like_filters_match_wildcards() {
    let molino = molino();
    load_articles(&molino, 12);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_like("title", "Article 1*").unwrap();
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 1", "Article 10", "Article 11"]);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_not_like("title", "*1*").unwrap();
    assert_eq!(q.count().unwrap(), 9);
}

#[test]
fn like_passes_underscore_through_as_native_wildcard() {
    let molino = molino();
    load_articles(&molino, 3);
    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_like("title", "Article_1").unwrap();
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 1"]);
}

#[test]
fn in_and_not_in_filters() {
    let molino = molino();
    load_articles(&molino, 5);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_in("id", vec![2, 4, 99]).unwrap();
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 1", "Article 3"]);

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_not_in("views", vec![0, 10]).unwrap();
    assert_eq!(q.count().unwrap(), 3);
}

#[test]
fn in_with_scalar_fails_before_touching_the_query() {
    let molino = molino();
    let mut q = molino.create_select_query("Article").unwrap();
    let err = q.filter_in("id", 3).unwrap_err();
    assert!(matches!(err, MolinoError::InvalidFilterArgument { .. }));
    assert!(!q.base().has_query_builder());
}

#[test]
fn sort_limit_skip_and_one() {
    let molino = molino();
    load_articles(&molino, 6);

    let mut q = molino.create_select_query("Article").unwrap();
    q.sort("views", Order::Desc).unwrap().skip(1).limit(2);
    assert_eq!(q.get_dql(), "SELECT m FROM Article m ORDER BY m.views DESC");
    assert_eq!(titles(&q.all().unwrap()), vec!["Article 4", "Article 3"]);
    // count ignora limit/skip
    assert_eq!(q.count().unwrap(), 6);

    let mut q = molino.create_select_query("Article").unwrap();
    q.sort("title", Order::Asc).unwrap();
    assert_eq!(q.one().unwrap().and_then(|r| r.get("title").cloned()), Some(Value::from("Article 0")));

    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_equal("title", "missing").unwrap();
    assert!(q.one().unwrap().is_none());
}

#[test]
fn fields_projects_records() {
    let molino = molino();
    load_articles(&molino, 2);
    let mut q = molino.create_select_query("Article").unwrap();
    q.fields(&["title"]).unwrap();
    let records = q.all().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.fields.len() == 1 && r.id.is_some()));
}

#[test]
fn cloned_queries_execute_independently() {
    let molino = molino();
    load_articles(&molino, 10);

    let mut base = molino.create_select_query("Article").unwrap();
    base.filter_greater_equal("views", 30).unwrap();

    let mut active = base.clone();
    active.filter_equal("is_active", true).unwrap();
    let mut inactive = base.clone();
    inactive.filter_equal("is_active", false).unwrap();

    assert_eq!(base.count().unwrap(), 7);
    assert_eq!(titles(&active.all().unwrap()), vec!["Article 4", "Article 6", "Article 8"]);
    assert_eq!(inactive.count().unwrap(), 4);
    assert_eq!(base.get_dql(), "SELECT m FROM Article m WHERE m.views >= ?1");
    assert_eq!(active.get_dql(), "SELECT m FROM Article m WHERE m.views >= ?1 AND m.is_active = ?2");
}

#[test]
fn unknown_alias_surfaces_as_backend_error() {
    let molino = molino();
    load_articles(&molino, 1);
    let mut q = molino.create_select_query("Article").unwrap();
    q.filter_equal("a.title", "x").unwrap();
    assert!(matches!(q.all().unwrap_err(), MolinoError::Backend(_)));
}
