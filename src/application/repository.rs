//! # File Repository
//!
//! Key→document-handle mapping resolved by terminal menu selections and
//! written by the admin upload-commit workflow. Overwrite-only: a later
//! upload with the same key replaces the handle, nothing ever deletes one.

use crate::application::store::SharedStore;
use crate::application::token::FileKey;
use crate::domain::errors::BotError;
use crate::domain::types::DocumentHandle;

pub struct FileRepository {
    store: SharedStore,
}

impl FileRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Pure read; fails with `NotFound` when nothing was uploaded for this
    /// key yet.
    pub fn get(&self, key: &FileKey) -> Result<DocumentHandle, BotError> {
        self.store
            .read(|d| d.files.get(&key.storage_key()).cloned())
            .ok_or_else(|| BotError::NotFound(key.storage_key()))
    }

    /// Store a handle under a key, durably, before returning. Overwrites
    /// silently if the key exists.
    pub fn put(&self, key: &FileKey, handle: DocumentHandle) -> Result<(), BotError> {
        self.store.mutate(|d| {
            d.files.insert(key.storage_key(), handle);
        })
    }

    /// All stored keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.store.read(|d| d.files.keys().cloned().collect())
    }
}
