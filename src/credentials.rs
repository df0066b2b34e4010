use crate::error::{JournalError, JournalResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";

/// The single login pair, stored in plain text.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the default pair when no credentials file exists yet.
    pub fn ensure_initialized(&self) -> JournalResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        let serialized = serde_json::to_string(&Credentials::default())?;
        fs::write(&self.path, serialized).map_err(|source| JournalError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "created default credentials");
        Ok(())
    }

    pub fn load(&self) -> JournalResult<Credentials> {
        let serialized = fs::read_to_string(&self.path).map_err(|source| JournalError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&serialized).map_err(|source| JournalError::Credentials {
            path: self.path.clone(),
            source,
        })
    }

    /// True only when both fields equal the stored values exactly.
    pub fn verify(&self, username: &str, password: &str) -> JournalResult<bool> {
        let stored = self.load()?;
        let ok = stored.username == username && stored.password == password;
        if ok {
            info!(username, "login accepted");
        } else {
            warn!(username, "login rejected");
        }
        Ok(ok)
    }
}
