//! Create the employees table and insert sample rows.
//!
//! Usage: `seed_db [DATABASE_PATH]` (falls back to `DATABASE_PATH`, then `./data.db`)

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use nl_query_engine::logging::init_logging;
use nl_query_engine::store::{prepare_database, SeedOutcome};
use nl_query_engine::AppConfig;

fn main() -> Result<()> {
    init_logging("info");

    let path = match env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            AppConfig::from_env()
                .context("Failed to load configuration")?
                .database
                .path
        }
    };

    match prepare_database(&path)? {
        SeedOutcome::Inserted(count) => println!("Seeded {} employees into {}", count, path.display()),
        SeedOutcome::AlreadySeeded => println!("{} already has data, nothing to do", path.display()),
    }

    Ok(())
}
