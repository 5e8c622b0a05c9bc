//! Seed command implementation.

use crate::cli::SeedArgs;
use crate::error::Result;
use crate::output::Formatter;
use bucketeer_board::seed::{default_items, JsonSeed};
use bucketeer_domain::SeedProvider;

/// Execute the seed command.
pub fn execute_seed(args: SeedArgs, formatter: &Formatter) -> Result<()> {
    let items = match args.seed {
        Some(path) => JsonSeed::new(path).seed_items()?,
        None => default_items(),
    };

    println!("{}", formatter.format_items(&items)?);
    Ok(())
}
