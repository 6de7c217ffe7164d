//! Demo: mismas llamadas de filtro sobre el backend elegido por `MOLINO_BACKEND`.

use molino::{AnyMolino, DeleteQuery, FilterQuery, ModelMetadata, Molino, MolinoResult, Order, SelectQuery,
             UpdateQuery, Value};

fn run() -> MolinoResult<()> {
    molino::init_dotenv();
    let molino = AnyMolino::from_env()?;
    println!("Backend: {}", molino.name());

    molino.register_model(ModelMetadata::new("Article").field("title", Value::Null)
                                                       .field("views", 0)
                                                       .field("is_active", true));
    for (title, views) in [("Rust in practice", 120), ("Query builders", 45), ("Mongo criteria", 80)] {
        let mut article = molino.create("Article")?;
        article.set("title", title).set("views", views);
        molino.save(&mut article)?;
    }

    let mut query = molino.create_select_query("Article")?;
    query.filter_greater_equal("views", 50)?.filter_like("title", "*r*")?;
    let mut popular = query.clone();
    popular.sort("views", Order::Desc)?.limit(1);

    println!("Query: {}", query.native_query());
    for article in query.all()? {
        println!("  - {:?} {:?}", article.get("title"), article.get("views"));
    }
    if let Some(top) = popular.one()? {
        println!("Top: {:?}", top.get("title"));
    }

    let mut update = molino.create_update_query("Article")?;
    update.filter_in("title", vec!["Query builders"])?.inc("views", 10)?;
    println!("Update: {} -> {} registros", update.native_query(), update.execute()?);

    let mut delete = molino.create_delete_query("Article")?;
    delete.filter_less("views", 100)?;
    println!("Delete: {} -> {} registros", delete.native_query(), delete.execute()?);

    println!("Restantes: {}", molino.create_select_query("Article")?.count()?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
