use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::cipher::{self, OpenError};
use crate::{LockboxProblem, TokenRecord, UserProfile};

/// Everything persisted in the credential file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    tokens: Option<TokenRecord>,
    user: Option<UserProfile>,
}

/// The encrypted credential file.
///
/// Every write replaces the whole file, so readers observe either the
/// previous contents or the new contents, never a mix.
#[derive(Debug, Clone)]
pub struct Lockbox {
    path: Utf8PathBuf,
}

impl Lockbox {
    /// Opens (without touching the filesystem) the credential file at `path`
    pub fn at(path: impl Into<Utf8PathBuf>) -> Lockbox {
        Lockbox { path: path.into() }
    }

    /// Where the credential file lives
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the stored token pair, if any
    pub fn load_tokens(&self) -> Result<Option<TokenRecord>, LockboxProblem> {
        Ok(self.read()?.tokens)
    }

    /// Returns the stored user profile, if any
    pub fn load_user(&self) -> Result<Option<UserProfile>, LockboxProblem> {
        Ok(self.read()?.user)
    }

    /// Replaces the stored token pair, keeping the stored user profile
    pub fn save_tokens(&self, tokens: &TokenRecord) -> Result<(), LockboxProblem> {
        let mut stored = self.read_or_discard()?;
        stored.tokens = Some(tokens.clone());
        self.write(&stored)
    }

    /// Starts a new session: stores `tokens` and drops any cached user
    /// profile in the same write.
    pub fn start_session(&self, tokens: &TokenRecord) -> Result<(), LockboxProblem> {
        self.write(&StoredCredentials {
            tokens: Some(tokens.clone()),
            user: None,
        })
    }

    /// Replaces the stored user profile, keeping the stored token pair
    pub fn save_user(&self, user: &UserProfile) -> Result<(), LockboxProblem> {
        let mut stored = self.read_or_discard()?;
        stored.user = Some(user.clone());
        self.write(&stored)
    }

    /// Removes every stored credential. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), LockboxProblem> {
        tracing::debug!(path = %self.path, "clearing stored credentials");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self) -> Result<StoredCredentials, LockboxProblem> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!(path = %self.path, "no credential file");
                return Ok(StoredCredentials::default());
            }
            Err(e) => return Err(e.into()),
        };
        let plaintext = cipher::open(&contents).map_err(|e| match e {
            OpenError::UnknownFormat => LockboxProblem::UnreadableCredentials(self.path.to_string()),
            OpenError::Corrupt => LockboxProblem::CorruptCredentials(self.path.to_string()),
        })?;
        Ok(serde_json::from_slice(&plaintext)?)
    }

    // a corrupt file is about to be overwritten anyway; only real I/O failures matter
    fn read_or_discard(&self) -> Result<StoredCredentials, LockboxProblem> {
        match self.read() {
            Err(problem) if problem.is_corrupt() => {
                tracing::warn!(path = %self.path, %problem, "discarding unreadable credential file");
                Ok(StoredCredentials::default())
            }
            other => other,
        }
    }

    fn write(&self, stored: &StoredCredentials) -> Result<(), LockboxProblem> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        fs::create_dir_all(dir)?;

        let plaintext = serde_json::to_vec(stored)?;
        let sealed =
            cipher::seal(&plaintext).map_err(|_| LockboxProblem::Seal(self.path.to_string()))?;

        // NamedTempFile is created 0600 on unix, and the rename keeps those permissions
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(sealed.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path, "wrote credentials");
        Ok(())
    }
}
