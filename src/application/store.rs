//! # Persisted Store
//!
//! The single durable document backing the bot: the admin identity list and
//! the file table, kept together in one JSON file. The registry and the
//! repository are views over their own sections; every mutation goes through
//! [`Store::mutate`], which holds the data lock across mutate + serialize +
//! atomic flush so interleaved writers can never flush a stale snapshot and a
//! crash can never leave a truncated file behind.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::errors::BotError;
use crate::domain::types::{DocumentHandle, UserId};

/// On-disk layout. Round-trips exactly through reload: admin order and file
/// insertion order are both preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedData {
    #[serde(default)]
    pub admins: Vec<UserId>,
    #[serde(default)]
    pub files: IndexMap<String, DocumentHandle>,
}

pub type SharedStore = Arc<Store>;

pub struct Store {
    path: PathBuf,
    data: Mutex<PersistedData>,
}

impl Store {
    /// Load the store from `path`, or bootstrap a fresh one if the file is
    /// absent or unreadable (not an error). The bootstrap admin is seeded
    /// into the admin list if missing, and the result is flushed so disk and
    /// memory agree from the start.
    pub fn open(path: impl Into<PathBuf>, bootstrap: &UserId) -> Result<SharedStore, BotError> {
        let path = path.into();
        let mut data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<PersistedData>(&raw) {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!("Persisted store unreadable, starting fresh: {err}");
                    PersistedData::default()
                }
            },
            Err(_) => PersistedData::default(),
        };
        if !data.admins.contains(bootstrap) {
            data.admins.insert(0, bootstrap.clone());
        }

        let store = Store {
            path,
            data: Mutex::new(data),
        };
        {
            let guard = store.lock();
            store.flush(&guard)?;
        }
        Ok(Arc::new(store))
    }

    /// Read through the current state.
    pub fn read<T>(&self, f: impl FnOnce(&PersistedData) -> T) -> T {
        f(&self.lock())
    }

    /// Apply `f` to the state and flush durably before returning. On flush
    /// failure the in-memory change is rolled back, leaving memory and disk
    /// consistent.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut PersistedData) -> T) -> Result<T, BotError> {
        let mut guard = self.lock();
        let snapshot = guard.clone();
        let out = f(&mut guard);
        if let Err(err) = self.flush(&guard) {
            *guard = snapshot;
            return Err(err);
        }
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, PersistedData> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write-to-temp, fsync, then rename over the real file.
    fn flush(&self, data: &PersistedData) -> Result<(), BotError> {
        let raw = serde_json::to_string_pretty(data)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(raw.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
