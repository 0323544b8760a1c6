mod api;
pub(crate) mod auth;
mod config;
pub(crate) mod output;

pub use api::Api;
pub use auth::Auth;
pub use config::Config;
pub use output::{FormatType, ShopctlOutput};
