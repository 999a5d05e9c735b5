//! Example: summarize a BIDS dataset.
//!
//! Usage:
//!   cargo run --example inspect -- <dataset_root> [task]

use std::env;

use bidskit::{Dataset, EntityKey, EntityQuery};

fn main() -> bidskit::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example inspect -- <dataset_root> [task]");
        std::process::exit(1);
    }

    let dataset = Dataset::new(&args[1])?;
    let inventory = dataset.inventory()?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Dataset: {}", inventory.root.display());
    println!("{}", separator);
    println!("Files:     {}", inventory.file_count);
    println!(
        "Datatypes: {}",
        inventory
            .datatypes
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for (key, values) in &inventory.entities {
        println!("{:<14} {}", format!("{}:", key), values.join(", "));
    }

    if let Some(task) = args.get(2) {
        println!();
        println!("Files for task '{}':", task);
        for path in dataset.find(&EntityQuery::new().with(EntityKey::Task, task))? {
            println!("  {}", path.fpath().display());
        }
    }

    Ok(())
}
