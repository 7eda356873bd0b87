//! # Demo Menu Seeder
//!
//! Builds a small demo menu through the public store API and prints the
//! export document.
//!
//! ## Usage
//! ```bash
//! # Seed the configured store and print the export
//! cargo run -p menu-store --bin seed
//!
//! # Use a specific config file and write the export to a file
//! cargo run -p menu-store --bin seed -- --config ./menu.toml --out ./menu.json
//!
//! # Do not touch persistent storage
//! cargo run -p menu-store --bin seed -- --memory
//! ```
//!
//! The store is cleared first, so running the seeder twice gives the same
//! menu (with fresh ids).

use std::env;
use std::path::PathBuf;

use menu_core::{ModifierInput, ModifierType, ProductId, ProductInput};
use menu_store::{MenuStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Option label and surcharge.
type OptionSeed = (&'static str, f64);

/// Modifier name, type, min, max and options.
type ModifierSeed = (&'static str, ModifierType, u32, u32, &'static [OptionSeed]);

/// Product name, description, price and modifiers.
type ProductSeed = (&'static str, &'static str, f64, &'static [ModifierSeed]);

const SIZES: &[OptionSeed] = &[("Small", 0.0), ("Medium", 0.5), ("Large", 1.0)];
const ICE: &[OptionSeed] = &[("No ice", 0.0), ("Light ice", 0.0), ("Extra ice", 0.0)];
const TOPPINGS: &[OptionSeed] = &[("Cheese", 0.75), ("Bacon", 1.5), ("Avocado", 1.25), ("Jalapenos", 0.5)];
const SPICE: &[OptionSeed] = &[("Mild", 0.0), ("Medium", 0.0), ("Hot", 0.0)];
const SIDES: &[OptionSeed] = &[("Fries", 0.0), ("Salad", 0.0), ("Onion rings", 1.0)];

/// Demo categories with their products.
const MENU: &[(&str, &[ProductSeed])] = &[
    (
        "Drinks",
        &[
            (
                "Cola",
                "Cold soda",
                2.5,
                &[
                    ("Size", ModifierType::Single, 1, 1, SIZES),
                    ("Ice", ModifierType::Single, 0, 1, ICE),
                ],
            ),
            ("Lemonade", "Fresh squeezed", 3.0, &[("Size", ModifierType::Single, 1, 1, SIZES)]),
            ("Iced Tea", "Black tea over ice", 2.75, &[]),
        ],
    ),
    (
        "Burgers",
        &[
            (
                "Classic Burger",
                "Beef patty, lettuce, tomato",
                9.5,
                &[
                    ("Toppings", ModifierType::Multiple, 0, 3, TOPPINGS),
                    ("Side", ModifierType::Single, 1, 1, SIDES),
                ],
            ),
            (
                "Veggie Burger",
                "Black bean patty",
                8.75,
                &[("Toppings", ModifierType::Multiple, 0, 4, TOPPINGS)],
            ),
        ],
    ),
    (
        "Tacos",
        &[
            ("Fish Taco", "Battered cod, slaw", 4.25, &[("Spice", ModifierType::Single, 1, 1, SPICE)]),
            ("Carnitas Taco", "Slow cooked pork", 3.95, &[("Spice", ModifierType::Single, 1, 1, SPICE)]),
        ],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut out_path: Option<PathBuf> = None;
    let mut memory = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--memory" | "-m" => memory = true,
            "--help" | "-h" => {
                println!("Menu Builder Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -o, --out <PATH>     Write the export document to PATH");
                println!("  -m, --memory         Use an in-memory store");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = if memory {
        StoreConfig::in_memory()
    } else {
        StoreConfig::load(config_path)?
    };

    let mut store = MenuStore::open(&config)?;
    store.clear()?;

    for (category_name, products) in MENU {
        let category = store.add_category(category_name)?;

        for (name, description, price, modifiers) in products.iter() {
            let product = store.add_product(&ProductInput {
                category_id: category.id,
                name: name.to_string(),
                description: description.to_string(),
                price: *price,
                image: None,
            })?;

            seed_modifiers(&mut store, product.id, modifiers)?;
        }
    }

    let stats = store.stats();
    info!(
        categories = stats.categories,
        products = stats.products,
        modifiers = stats.modifiers,
        options = stats.options,
        "Demo menu seeded"
    );

    let json = store.export_json()?;
    match out_path {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!(?path, "Export written");
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn seed_modifiers(
    store: &mut MenuStore,
    product_id: ProductId,
    modifiers: &[ModifierSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    for (position, (name, modifier_type, min, max, options)) in modifiers.iter().enumerate() {
        for (label, value) in options.iter() {
            store.add_option(label, *value)?;
        }

        store.save_modifier(&ModifierInput {
            product_id,
            name: name.to_string(),
            min: *min,
            max: *max,
            modifier_type: *modifier_type,
            position: position as i32 + 1,
        })?;
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: INFO for all crates
/// - menu_*: DEBUG
/// - Set `RUST_LOG` to override
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,menu=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
