use std::io;

use thiserror::Error;

/// LockboxProblem is the type of Error that occurred.
#[derive(Error, Debug)]
pub enum LockboxProblem {
    /// DefaultConfigDirNotFound occurs when the default OS config can't be found.
    #[error("Could not determine default OS configuration directory.")]
    DefaultConfigDirNotFound,

    /// InvalidOverrideConfigDir occurs when a user provides a path to a non-directory.
    #[error("'{0}' already exists and is not a directory.")]
    InvalidOverrideConfigDir(String),

    /// UnreadableCredentials occurs when the credential file does not carry a format
    /// this version of shopctl understands.
    #[error("The credential file at '{0}' is not in a format shopctl understands.")]
    UnreadableCredentials(String),

    /// CorruptCredentials occurs when the credential file fails authentication on decryption.
    #[error("The credential file at '{0}' could not be decrypted. It may have been modified.")]
    CorruptCredentials(String),

    /// Seal occurs when the credentials could not be encrypted.
    #[error("Could not encrypt credentials for '{0}'.")]
    Seal(String),

    /// PathNotUtf8 occurs when a file path is not valid UTF-8
    #[error(transparent)]
    PathNotUtf8(#[from] camino::FromPathBufError),

    /// Json occurs when the decrypted credentials can't be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// io::Error occurs when any given std::io::Error arises.
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl LockboxProblem {
    /// true when the stored file exists but its contents can't be trusted
    pub const fn is_corrupt(&self) -> bool {
        matches!(
            self,
            LockboxProblem::CorruptCredentials(_)
                | LockboxProblem::UnreadableCredentials(_)
                | LockboxProblem::Json(_)
        )
    }
}
