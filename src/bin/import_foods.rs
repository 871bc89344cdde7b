//! Utility to bulk-import catalog foods from a JSON file
//!
//! Usage: import_foods <foods.json>
//! The file holds a JSON array of food definitions; each entry goes through
//! the same validation path the catalog UI uses.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use nutricalc::models::FoodCreate;
use nutricalc::tools::foods;

fn get_database_path() -> PathBuf {
    std::env::var("NUTRICALC_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("nutricalc.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutricalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let file = std::env::args()
        .nth(1)
        .ok_or("usage: import_foods <foods.json>")?;

    let contents = std::fs::read_to_string(&file)?;
    let items: Vec<FoodCreate> = serde_json::from_str(&contents)?;

    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = nutricalc::db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        nutricalc::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for item in items {
        let name = item.name.clone();
        match foods::add_food(&database, item) {
            Ok(added) => {
                println!("  imported: {} (id {})", added.name, added.id);
                imported += 1;
            }
            Err(e) => {
                eprintln!("  skipped {}: {}", name, e);
                skipped += 1;
            }
        }
    }

    println!("Done: {} imported, {} skipped", imported, skipped);

    Ok(())
}
