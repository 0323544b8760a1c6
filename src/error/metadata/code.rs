use std::fmt::{self, Display};

use serde::Serialize;

/// `ShopctlErrorCode` contains the error codes associated with specific errors.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ShopctlErrorCode {
    /// not logged in, or the session could not be renewed
    E001,
    /// the user denied the login request
    E002,
    /// the login code expired before it was approved
    E003,
    /// the auth service answered in a way shopctl does not understand
    E004,
    /// the request never got an answer
    E005,
    E006,
    /// the credential file could not be read
    E007,
    /// no usable configuration directory
    E008,
    /// the commerce API rejected the request
    E009,
    /// a command argument could not be used
    E010,
}

impl ShopctlErrorCode {
    pub const fn exit_code(self) -> i32 {
        match self {
            ShopctlErrorCode::E001 => 3,
            ShopctlErrorCode::E002 => 4,
            ShopctlErrorCode::E003 => 5,
            _ => 1,
        }
    }
}

impl Display for ShopctlErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{self:?}")
    }
}
