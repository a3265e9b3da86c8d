//! Storage
//!
//! A small key-value capability standing in for browser local storage. Values
//! survive for as long as the backing store does and are scoped to it.

use std::io;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure.
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The write would exceed the backend's capacity.
    #[error("storage quota of {limit} bytes exceeded writing {key}")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Capacity of the store in bytes
        limit: usize,
    },
}

/// Key-value store the cart and theme preference are persisted to.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejected the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
