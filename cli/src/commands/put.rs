use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use humantime::format_duration;
use spatia_core::{
    codec::decode,
    storage::{rocksdb::RocksDBStore, Store},
};
use tracing::info;
use ulid::Ulid;

use super::{blob_error::IntoBlobError, read_blob};

/// Store a geometry blob in a column of the data store
#[derive(Args, Debug)]
pub struct PutArgs {
    /// The column to store the blob in
    #[arg(long, short)]
    pub column: String,

    /// The file containing the blob (`-` for standard input)
    #[arg(name = "FILE")]
    pub file: String,

    /// Store the blob under this ID instead of generating a new one
    #[arg(long)]
    pub id: Option<Ulid>,
}

/// Run the `put` command
pub fn run_put(store_path: &str, args: PutArgs) -> Result<()> {
    let start = Instant::now();
    let blob = read_blob(&args.file)?;

    // only store blobs that can be read back
    let geometry = decode(&blob).map_err(|e| e.into_blob_error(&blob))?;

    // initialize store
    let mut store = RocksDBStore::new(store_path)?;

    let id = args.id.unwrap_or_else(Ulid::new);
    store.put(&args.column, id, blob)?;
    store.commit()?;

    info!(
        column = %args.column,
        %id,
        geometry_type = %geometry.geometry_type(),
        "stored geometry"
    );
    println!("{id}");
    eprintln!(
        "Stored {} in {}",
        geometry.geometry_type(),
        format_duration(Duration::from_millis(start.elapsed().as_millis() as u64))
    );

    Ok(())
}
