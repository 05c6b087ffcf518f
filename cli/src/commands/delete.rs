use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use humantime::format_duration;
use spatia_core::storage::{rocksdb::RocksDBStore, Store};
use tracing::debug;
use ulid::Ulid;

/// Delete geometry blobs from the data store
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// The column to delete from
    #[arg(long, short)]
    pub column: String,

    /// One or more IDs of blobs to delete
    #[arg(name = "ID", required = true)]
    pub ids: Vec<Ulid>,
}

/// Run the `delete` command
pub fn run_delete(store_path: &str, args: DeleteArgs) -> Result<()> {
    // initialize store
    let mut store = RocksDBStore::new(store_path)?;

    let delete_start = Instant::now();
    let mut deleted = 0;

    for id in &args.ids {
        if store.get(&args.column, *id)?.is_none() {
            debug!(column = %args.column, %id, "geometry not found");
            continue;
        }
        store.delete(&args.column, *id)?;
        deleted += 1;
    }

    if deleted > 0 {
        store.commit()?;
    }

    eprintln!(
        "Deleted {} geometries in {}",
        deleted,
        format_duration(Duration::from_millis(
            delete_start.elapsed().as_millis() as u64
        ))
    );

    Ok(())
}
