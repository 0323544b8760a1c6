pub mod auth;
pub mod cli;
mod client;
pub mod command;
mod context;
mod error;
pub mod utils;

pub use cli::Shopctl;
pub use client::{ApiClient, ApiClientError, ApiResponse};
pub use command::ShopctlOutput;
pub use context::ShopctlContext;
pub use error::{
    ShopctlError, ShopctlErrorCode, ShopctlErrorMetadata, ShopctlErrorSuggestion, ShopctlResult,
};
