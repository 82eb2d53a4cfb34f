//! Cart persistence
//!
//! The whole cart is written as one JSON array on every save; the last writer
//! wins.

use std::{
    cell::RefCell,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::cart::Cart;

/// Errors raised while loading or saving a cart.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Reading or writing the backing file failed.
    #[error("cart file {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,

        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The stored cart is not valid JSON in the expected layout.
    #[error("stored cart is malformed")]
    Malformed(#[from] serde_json::Error),
}

/// Somewhere a cart survives between sessions.
pub trait CartStorage {
    /// Load the stored cart; nothing stored yet is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the stored cart cannot be read or decoded.
    fn load(&self) -> Result<Cart, CartStorageError>;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the cart cannot be encoded or written.
    fn save(&self, cart: &Cart) -> Result<(), CartStorageError>;
}

/// Cart stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Store the cart at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CartStorageError {
        CartStorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Cart, CartStorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Cart::new()),
            Err(error) => return Err(self.io_error(error)),
        };

        if contents.trim().is_empty() {
            return Ok(Cart::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        let contents = serde_json::to_string_pretty(cart)?;

        fs::write(&self.path, contents).map_err(|error| self.io_error(error))
    }
}

/// Cart kept in memory, serialised the same way as on disk.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    contents: RefCell<Option<String>>,
}

impl MemoryCartStorage {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The serialised cart, if one was saved.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Cart, CartStorageError> {
        match self.contents.borrow().as_deref() {
            Some(contents) => Ok(serde_json::from_str(contents)?),
            None => Ok(Cart::new()),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        let contents = serde_json::to_string(cart)?;

        self.contents.replace(Some(contents));

        Ok(())
    }
}
