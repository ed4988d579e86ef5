//! The logged-in user, persisted under a single key.
//!
//! Login is a role selector: there are no credentials, the session simply
//! points at the first account with the requested role.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::{Role, User};
use crate::user_actor::UserError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("No {0} account available")]
    NoAccount(Role),
    #[error(transparent)]
    Users(#[from] UserError),
    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Where the session key lives.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<User>, SessionError>;
    fn save(&self, user: &User) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    user: User,
}

/// JSON file holding `{"user": {...}}`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let file: SessionFile = serde_json::from_str(&contents)?;
                Ok(Some(file.user))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(&SessionFile { user: user.clone() })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    current: Mutex<Option<User>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let current = self.current.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(current.clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        let mut current = self.current.lock().map_err(|_| SessionError::Poisoned)?;
        *current = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.current.lock().map_err(|_| SessionError::Poisoned)?;
        *current = None;
        Ok(())
    }
}

/// Logs in as the first account with `role` and persists it.
#[instrument(skip(users, store))]
pub async fn login_as(users: &UserClient, store: &dyn SessionStore, role: Role) -> Result<User, SessionError> {
    let user = users
        .first_with_role(role)
        .await?
        .ok_or(SessionError::NoAccount(role))?;
    store.save(&user)?;
    info!(user_id = %user.id, business = %user.business_name, "Logged in");
    Ok(user)
}

/// Restores the persisted session if its account still exists.
/// A session pointing at a missing account is cleared.
#[instrument(skip(users, store))]
pub async fn restore(users: &UserClient, store: &dyn SessionStore) -> Result<Option<User>, SessionError> {
    let Some(saved) = store.load()? else {
        return Ok(None);
    };
    match users.get_user(saved.id.clone()).await? {
        Some(user) => {
            info!(user_id = %user.id, "Session restored");
            Ok(Some(user))
        }
        None => {
            warn!(user_id = %saved.id, "Stale session, clearing");
            store.clear()?;
            Ok(None)
        }
    }
}

pub fn logout(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.clear()
}
