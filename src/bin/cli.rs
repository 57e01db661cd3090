//! slotvec CLI
//!
//! Command-line interface for driving a storage vector over a
//! file-backed store. This is the dispatch shim: it translates named
//! subcommands into vector operations and prints the results; all
//! semantics live in the library.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use slotvec::config::SyncStrategy;
use slotvec::{BaseKey, Config, FileStore, Result, StorageVec};

/// slotvec CLI
#[derive(Parser, Debug)]
#[command(name = "slotvec-cli")]
#[command(about = "CLI for the slotvec storage vector")]
#[command(version)]
struct Args {
    /// Data file
    #[arg(short, long, default_value = "./slotvec.db")]
    data: String,

    /// Vector name (hashed into its base key)
    #[arg(short, long, default_value = "default")]
    vec: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a value
    Push {
        /// The value to append
        value: String,
    },

    /// Remove and print the last value
    Pop,

    /// Print the value at an index
    Get {
        /// The index to read
        index: u64,
    },

    /// Overwrite the value at an index
    Set {
        /// The index to overwrite
        index: u64,

        /// The new value
        value: String,
    },

    /// Print the first value
    First,

    /// Print the last value
    Last,

    /// Print the number of elements
    Len,

    /// Insert a value at an index, shifting the rest up
    Insert {
        /// The insertion index (may equal the length to append)
        index: u64,

        /// The value to insert
        value: String,
    },

    /// Remove and print the value at an index, preserving order
    Remove {
        /// The index to remove
        index: u64,
    },

    /// Exchange two elements
    Swap {
        /// First index
        i: u64,

        /// Second index
        j: u64,
    },

    /// Remove and print the value at an index, moving the last element
    /// into its place
    SwapRemove {
        /// The index to remove
        index: u64,
    },

    /// Reverse the element order
    Reverse,

    /// Overwrite every element with a value
    Fill {
        /// The fill value
        value: String,
    },

    /// Grow or shrink to a length, filling new slots with a value
    Resize {
        /// The new length
        len: u64,

        /// The fill value for new slots
        value: String,
    },

    /// Reset the vector to empty
    Clear,

    /// Print every element
    List,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slotvec=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::debug!("slotvec v{}", slotvec::VERSION);
    tracing::debug!("Data file: {}", args.data);
    tracing::debug!("Vector: {}", args.vec);

    // Persist once on close rather than after every slot write
    let config = Config::builder()
        .data_path(&args.data)
        .sync_strategy(SyncStrategy::Manual)
        .build();

    let store = match FileStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let vec = StorageVec::new(&store, BaseKey::from_name(&args.vec));

    if let Err(e) = run(&vec, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = store.close() {
        tracing::error!("Failed to persist store: {}", e);
        std::process::exit(1);
    }
}

/// Route a subcommand to the vector operation it names
fn run(vec: &StorageVec<String, &FileStore>, command: Commands) -> Result<()> {
    match command {
        Commands::Push { value } => vec.push(value),
        Commands::Pop => {
            println!("{}", vec.pop()?);
            Ok(())
        }
        Commands::Get { index } => {
            println!("{}", vec.get(index)?);
            Ok(())
        }
        Commands::Set { index, value } => vec.set(index, value),
        Commands::First => {
            println!("{}", vec.first()?);
            Ok(())
        }
        Commands::Last => {
            println!("{}", vec.last()?);
            Ok(())
        }
        Commands::Len => {
            println!("{}", vec.len()?);
            Ok(())
        }
        Commands::Insert { index, value } => vec.insert(index, value),
        Commands::Remove { index } => {
            println!("{}", vec.remove(index)?);
            Ok(())
        }
        Commands::Swap { i, j } => vec.swap(i, j),
        Commands::SwapRemove { index } => {
            println!("{}", vec.swap_remove(index)?);
            Ok(())
        }
        Commands::Reverse => vec.reverse(),
        Commands::Fill { value } => vec.fill(value),
        Commands::Resize { len, value } => vec.resize(len, value),
        Commands::Clear => vec.clear(),
        Commands::List => {
            for (index, item) in vec.iter()?.enumerate() {
                println!("{}: {}", index, item?);
            }
            Ok(())
        }
    }
}
