pub mod rocksdb;

use anyhow::{bail, Context, Result};
use tracing::debug;
use ulid::Ulid;

use crate::{
    codec::{decode, encode},
    geometry::Geometry,
};

/// A store for geometry blobs. Blobs are opaque to the store: they are
/// returned exactly as they were added. Every blob belongs to a named
/// column and is identified by an ID within that column.
pub trait Store {
    /// Add a blob with the given ID to a column, replacing any blob with the
    /// same ID
    fn put(&mut self, column: &str, id: Ulid, blob: Vec<u8>) -> Result<()>;

    /// Delete the blob with the given ID from a column
    fn delete(&mut self, column: &str, id: Ulid) -> Result<()>;

    /// Flush pending writes after adding or deleting one or more blobs
    fn commit(&mut self) -> Result<()>;

    /// Retrieve a blob by column and ID from the store
    fn get(&self, column: &str, id: Ulid) -> Result<Option<Vec<u8>>>;
}

/// Builds the key under which a blob is stored. Keys of the same column
/// share a prefix and are sorted by ID.
pub(crate) fn column_key(column: &str, id: Ulid) -> Result<Vec<u8>> {
    if column.is_empty() {
        bail!("Column name must not be empty");
    }
    if column.contains('\0') {
        bail!("Column name `{column}' must not contain NUL characters");
    }

    let mut key = Vec::with_capacity(column.len() + 1 + 16);
    key.extend_from_slice(column.as_bytes());
    key.push(0);
    // big-endian, so that keys sort by ID
    key.extend_from_slice(&id.0.to_be_bytes());
    Ok(key)
}

/// A geometry column on top of a [`Store`]. Encodes geometries on the way in
/// and decodes them on the way out.
pub struct GeometryColumn<'s, S> {
    store: &'s mut S,
    name: String,
}

impl<'s, S: Store> GeometryColumn<'s, S> {
    pub fn new(store: &'s mut S, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a geometry under a newly generated ID and returns the ID
    pub fn insert(&mut self, geometry: &Geometry) -> Result<Ulid> {
        let id = Ulid::new();
        self.put(id, geometry)?;
        Ok(id)
    }

    /// Adds a geometry under the given ID
    pub fn put(&mut self, id: Ulid, geometry: &Geometry) -> Result<()> {
        let blob = encode(geometry)
            .with_context(|| format!("Unable to encode geometry for column `{}'", self.name))?;
        debug!(
            column = %self.name,
            %id,
            geometry_type = %geometry.geometry_type(),
            len = blob.len(),
            "encoded geometry"
        );
        self.store.put(&self.name, id, blob)
    }

    /// Retrieves and decodes the geometry with the given ID
    pub fn get(&self, id: Ulid) -> Result<Option<Geometry>> {
        let Some(blob) = self.store.get(&self.name, id)? else {
            return Ok(None);
        };
        let geometry = decode(&blob).with_context(|| {
            format!(
                "Unable to decode geometry `{id}' from column `{}'",
                self.name
            )
        })?;
        Ok(Some(geometry))
    }

    pub fn delete(&mut self, id: Ulid) -> Result<()> {
        self.store.delete(&self.name, id)
    }

    pub fn commit(&mut self) -> Result<()> {
        self.store.commit()
    }
}
