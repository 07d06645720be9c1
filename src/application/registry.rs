//! # Admin Registry
//!
//! The persistent administrator-identity set. Loaded (or bootstrapped with
//! the configured default admin) once at process start; every mutation is
//! persisted before it is reported as successful. The bootstrap identity can
//! never be removed, which keeps the set non-empty at all times.

use crate::application::store::SharedStore;
use crate::domain::errors::BotError;
use crate::domain::types::UserId;

pub struct AdminRegistry {
    store: SharedStore,
    bootstrap: UserId,
}

impl AdminRegistry {
    pub fn new(store: SharedStore, bootstrap: UserId) -> Self {
        Self { store, bootstrap }
    }

    pub fn is_admin(&self, id: &UserId) -> bool {
        self.store.read(|d| d.admins.contains(id))
    }

    /// Idempotent add; persists before returning.
    pub fn add(&self, id: UserId) -> Result<(), BotError> {
        self.store.mutate(|d| {
            if !d.admins.contains(&id) {
                d.admins.push(id);
            }
        })
    }

    /// Remove an admin. `Ok(true)` when an entry existed, `Ok(false)` when it
    /// did not; removing the bootstrap identity is a distinct failure so
    /// callers can word the rejection differently from "not found".
    pub fn remove(&self, id: &UserId) -> Result<bool, BotError> {
        if *id == self.bootstrap {
            return Err(BotError::CannotRemoveBootstrapAdmin);
        }
        self.store.mutate(|d| {
            let before = d.admins.len();
            d.admins.retain(|admin| admin != id);
            d.admins.len() != before
        })
    }

    /// All admin identities, in insertion order.
    pub fn list(&self) -> Vec<UserId> {
        self.store.read(|d| d.admins.clone())
    }
}
