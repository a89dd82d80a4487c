//! Settle Up CLI
//!
//! Reads a `name,paid` CSV and prints who pays whom how much.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- payments.csv Alice   # one participant's description
//! cargo run -- payments.csv > all.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `trace` to follow the matching

use settle_up::{read_contributions, settle, Result, SettleError};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(SettleError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let contributions = read_contributions(BufReader::new(file))?;

    let settlement = settle(&contributions)?;

    match args.get(2) {
        Some(target) => println!("{}", settlement.describe(target)?),
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            settlement.write_output(handle)?;
        }
    }

    Ok(())
}
