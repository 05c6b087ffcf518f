use anyhow::{Context, Result};
use rocksdb::{DBCompressionType, Options, DB};
use tracing::debug;
use ulid::Ulid;

use super::{column_key, Store};

/// Options for opening a [`RocksDBStore`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Create the database if it does not exist yet
    pub create_if_missing: bool,

    /// Compress stored blobs with LZ4
    pub compression: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            compression: true,
        }
    }
}

/// An implementation of the [`Store`] trait backed by RocksDB
pub struct RocksDBStore {
    db: DB,
}

impl RocksDBStore {
    /// Creates a new RocksDB store at the given location
    pub fn new(path: &str) -> Result<Self> {
        Self::with_options(path, &StoreOptions::default())
    }

    /// Opens a RocksDB store at the given location with custom options
    pub fn with_options(path: &str, options: &StoreOptions) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(options.create_if_missing);
        opts.set_compression_type(if options.compression {
            DBCompressionType::Lz4
        } else {
            DBCompressionType::None
        });

        let db = DB::open(&opts, path)
            .with_context(|| format!("Unable to open store at `{path}'"))?;
        debug!(path, "opened store");
        Ok(Self { db })
    }
}

impl Store for RocksDBStore {
    fn put(&mut self, column: &str, id: Ulid, blob: Vec<u8>) -> Result<()> {
        let key = column_key(column, id)?;
        debug!(column, %id, len = blob.len(), "put blob");
        self.db.put(key, blob)?;
        Ok(())
    }

    fn delete(&mut self, column: &str, id: Ulid) -> Result<()> {
        let key = column_key(column, id)?;
        debug!(column, %id, "delete blob");
        self.db.delete(key)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        // nothing to do here
        Ok(())
    }

    fn get(&self, column: &str, id: Ulid) -> Result<Option<Vec<u8>>> {
        let key = column_key(column, id)?;
        Ok(self.db.get(key)?)
    }
}
