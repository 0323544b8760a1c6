//! OAuth 2.0 Device Authorization Grant (RFC 8628) for shopctl, plus the
//! refresh and revocation calls that keep the resulting tokens alive.

pub mod config;
mod client;
mod device_flow;
pub mod error;
mod grant;
pub mod types;

pub use client::AuthClient;
pub use config::{is_unauthenticated_path, AuthServerConfig};
pub use error::OAuthError;
pub use types::*;
