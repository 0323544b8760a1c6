#![cfg_attr(not(test), deny(clippy::panic))]
#![deny(missing_docs)]

//! Encrypted, single-file storage for shopctl's OAuth tokens and the
//! profile of the user they belong to.

mod cipher;
mod config;
mod error;
mod mask;
mod record;
mod store;

pub use config::Config;
pub use error::LockboxProblem;
pub use mask::mask_token;
pub use record::{CredentialOrigin, TokenRecord, UserProfile};
pub use store::Lockbox;
