use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use spatia_core::{
    codec::{decode_with_header, DecodeOptions},
    storage::{rocksdb::RocksDBStore, Store},
};
use ulid::Ulid;

use super::{blob_error::IntoBlobError, inspect::print_summary};

/// Fetch a geometry blob from the data store
#[derive(Args, Debug)]
pub struct GetArgs {
    /// The column to fetch the blob from
    #[arg(long, short)]
    pub column: String,

    /// The ID of the blob
    #[arg(name = "ID")]
    pub id: Ulid,

    /// Write the raw blob to this file instead of printing a summary
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Run the `get` command
pub fn run_get(store_path: &str, args: GetArgs) -> Result<()> {
    // initialize store
    let store = RocksDBStore::new(store_path)?;

    let blob = store.get(&args.column, args.id)?.with_context(|| {
        format!(
            "Unable to find geometry with ID `{}' in column `{}'",
            args.id, args.column
        )
    })?;

    let (header, geometry) = decode_with_header(&blob, &DecodeOptions::default())
        .map_err(|e| e.into_blob_error(&blob))?;

    match args.output {
        Some(path) => fs::write(&path, &blob)
            .with_context(|| format!("Unable to write blob to `{}'", path.display()))?,
        None => print_summary(&header, &geometry, blob.len()),
    }

    Ok(())
}
