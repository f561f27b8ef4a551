//! Cart persistence
//!
//! Stores upsert carts keyed by user id. The cart operations never call a
//! store; callers hand finished cart values over.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::cart::Cart;

/// Errors raised while saving or loading carts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("failed to access cart store: {0}")]
    Io(#[from] io::Error),

    /// Backing file is not a valid list of carts.
    #[error("failed to encode or decode carts: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere carts can be saved to and read back from.
pub trait CartStore {
    /// Insert `cart`, replacing any cart with the same user id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store cannot be updated.
    fn save(&mut self, cart: &Cart) -> Result<(), StoreError>;

    /// Load the cart for `user_id`, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store cannot be read.
    fn load(&self, user_id: &str) -> Result<Option<Cart>, StoreError>;
}

/// Replace the cart with the same user id in place, or append.
fn upsert(carts: &mut Vec<Cart>, cart: &Cart) {
    match carts
        .iter_mut()
        .find(|existing| existing.user_id() == cart.user_id())
    {
        Some(existing) => existing.clone_from(cart),
        None => carts.push(cart.clone()),
    }
}

/// In-memory store backed by a list.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    carts: Vec<Cart>,
}

impl MemoryCartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved carts in first-saved order.
    pub fn carts(&self) -> &[Cart] {
        &self.carts
    }
}

impl CartStore for MemoryCartStore {
    fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        upsert(&mut self.carts, cart);

        debug!(user_id = %cart.user_id(), carts = self.carts.len(), "saved cart in memory");

        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .carts
            .iter()
            .find(|cart| cart.user_id() == user_id)
            .cloned())
    }
}

/// Store backed by a JSON file holding a list of carts.
///
/// Each save reads the whole file, upserts, writes the result to a temporary
/// file in the same directory and renames it over the original, so readers see
/// either the old list or the new one. A missing file is treated as an empty
/// store.
#[derive(Debug, Clone)]
pub struct JsonFileCartStore {
    path: PathBuf,
}

impl JsonFileCartStore {
    /// Use the file at `path`, which need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every cart in the file.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file exists but cannot be read or parsed.
    pub fn carts(&self) -> Result<Vec<Cart>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }
}

impl CartStore for JsonFileCartStore {
    fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let mut carts = self.carts()?;
        upsert(&mut carts, cart);

        let json = serde_json::to_string_pretty(&carts)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(io::Error::from)?;

        debug!(
            user_id = %cart.user_id(),
            path = %self.path.display(),
            carts = carts.len(),
            "saved cart to file"
        );

        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .carts()?
            .into_iter()
            .find(|cart| cart.user_id() == user_id))
    }
}
