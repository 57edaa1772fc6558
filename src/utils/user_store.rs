use std::path::{Path, PathBuf};

use dashmap::{mapref::entry::Entry, DashMap};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{
    error::StoreError,
    user::{Preferences, StoredUser, User},
};

/// Concurrent user map keyed by username, optionally mirrored to a JSON file.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, StoredUser>,
    snapshot_path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a store backed by `path`, loading existing users if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let users = DashMap::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let loaded: Vec<StoredUser> = serde_json::from_slice(&bytes)?;
                for user in loaded {
                    users.insert(user.username.clone(), user);
                }
                info!(path = %path.display(), count = users.len(), "Loaded user snapshot");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No user snapshot yet, starting empty");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            users,
            snapshot_path: Some(path),
            write_lock: Mutex::new(()),
        })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<StoredUser> {
        self.users.get(username).map(|u| u.value().clone())
    }

    /// Inserts a new user. Fails with `Duplicate` if the username is taken.
    /// A failed snapshot write removes the user again.
    pub async fn insert(&self, user: StoredUser) -> Result<User, StoreError> {
        let created = match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Duplicate(user.username)),
            Entry::Vacant(slot) => slot.insert(user).to_user(),
        };
        if let Err(e) = self.persist().await {
            self.users.remove(&created.username);
            warn!(username = %created.username, error = %e, "Snapshot write failed, registration undone");
            return Err(e);
        }
        Ok(created)
    }

    /// Replaces the preferences record of an existing user.
    /// A failed snapshot write restores the previous record.
    pub async fn update_preferences(
        &self,
        username: &str,
        preferences: Preferences,
    ) -> Result<User, StoreError> {
        let (updated, previous) = match self.users.get_mut(username) {
            Some(mut entry) => {
                let previous = std::mem::replace(&mut entry.preferences, preferences);
                (entry.to_user(), previous)
            }
            None => return Err(StoreError::NotFound(username.to_string())),
        };
        if let Err(e) = self.persist().await {
            if let Some(mut entry) = self.users.get_mut(username) {
                // Leave a newer concurrent update alone.
                if entry.preferences == updated.preferences {
                    entry.preferences = previous;
                }
            }
            warn!(username, error = %e, "Snapshot write failed, preferences restored");
            return Err(e);
        }
        Ok(updated)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let _guard = self.write_lock.lock().await;
        let mut snapshot: Vec<StoredUser> = self.users.iter().map(|e| e.value().clone()).collect();
        snapshot.sort_by(|a, b| a.username.cmp(&b.username));
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!(path = %path.display(), count = snapshot.len(), "Wrote user snapshot");
        Ok(())
    }
}
