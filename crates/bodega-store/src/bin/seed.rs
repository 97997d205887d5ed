//! # Seed Tool
//!
//! Creates a development database and populates it with the bundled
//! fixture catalog (plus, optionally, a demo account).
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p bodega-store --bin seed
//!
//! # Specify database path
//! cargo run -p bodega-store --bin seed -- --db ./data/bodega.db
//!
//! # Also create a demo account (demo@bodega.example / Demo1234)
//! cargo run -p bodega-store --bin seed -- --demo-account
//! ```

use std::env;

use bodega_core::SignUpForm;
use bodega_store::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bodega_dev.db");
    let mut demo_account = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--demo-account" => {
                demo_account = true;
            }
            "--help" | "-h" => {
                println!("Bodega Seed Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./bodega_dev.db)");
                println!("      --demo-account  Also create demo@bodega.example / Demo1234");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Bodega Seed Tool");
    println!("================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::open(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let products = store.products();
    if products.seed_if_needed().await? {
        println!("✓ Fixture catalog written");
    } else {
        println!("⚠ Catalog already seeded, skipping");
    }
    println!("  Catalog size: {}", products.count().await?);

    if demo_account {
        let result = store
            .auth()
            .sign_up(SignUpForm {
                name: "Demo User".to_string(),
                email: "demo@bodega.example".to_string(),
                password: "Demo1234".to_string(),
                confirm_password: "Demo1234".to_string(),
            })
            .await;

        match result {
            Ok(user) => println!("✓ Demo account created ({})", user.email),
            Err(err) if err.is_domain() => println!("⚠ Demo account skipped: {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
