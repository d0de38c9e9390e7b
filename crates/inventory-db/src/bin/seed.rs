//! # Seed Data Generator
//!
//! Populates the database with test items for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 items (default)
//! cargo run -p inventory-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p inventory-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p inventory-db --bin seed -- --db ./data/item_database
//! ```
//!
//! ## Generated Items
//! Hardware-store stock with deterministic prices and quantities, inserted
//! through the sentinel-id path so the store assigns every id.

use std::env;

use inventory_core::Item;
use inventory_db::{Database, DbConfig};

/// Base item names for test data
const NAMES: &[&str] = &[
    "Widget", "Bolt", "Nut", "Screw", "Washer", "Nail", "Hinge", "Bracket", "Clamp", "Dowel",
    "Gasket", "Rivet", "Spring", "Anchor", "Coupling", "Grommet", "Pulley", "Spacer", "Shim",
    "Flange",
];

/// Size variants with a price addon in cents
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 25),
    ("Large", 60),
    ("XL", 110),
    ("Brass", 40),
    ("Steel", 80),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut db_path = String::from("./item_database");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventory Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: 100)");
                println!("  -d, --db <PATH>    Database file path (default: ./item_database)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Inventory Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Schema ready");

    // Check existing items
    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate items
    println!();
    println!("Generating items...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (name_idx, name) in NAMES.iter().enumerate() {
        for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let item = generate_item(name, size, *price_addon, name_idx * SIZES.len() + size_idx);

            if let Err(e) = db.items().insert(&item).await {
                eprintln!("Failed to insert {}: {}", item.name, e);
                continue;
            }

            generated += 1;

            if generated % 50 == 0 {
                println!("  Generated {} items...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} items in {:?}", generated, elapsed);

    // Verify
    println!();
    println!("Verifying...");
    let total = db.items().count().await?;
    println!("  Store now holds {} items", total);

    let sorted = db.items().all().await?;
    if let Some(first) = sorted.first() {
        println!(
            "  First by name: {} (${:.2}, qty {})",
            first.name, first.price, first.quantity
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single item with deterministic data.
fn generate_item(name: &str, size: &str, price_addon: i64, seed: usize) -> Item {
    // Base price $0.49-$9.98, plus the size addon
    let price_cents = 49 + ((seed * 17) % 950) as i64 + price_addon;

    // Stock 0-249
    let quantity = ((seed * 13) % 250) as i64;

    Item::new(
        format!("{} {}", name, size),
        price_cents as f64 / 100.0,
        quantity,
    )
}
