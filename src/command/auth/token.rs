use clap::Parser;

use crate::{
    auth::{AuthError, TokenProvider},
    context::ShopctlContext,
    ShopctlOutput, ShopctlResult,
};

#[derive(Debug, Parser)]
/// Print an access token for use in scripts
pub struct Token {}

impl Token {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        match context.lifecycle.ensure_valid_token().await? {
            Some(token) => Ok(ShopctlOutput::Token(token)),
            None => Err(AuthError::NotAuthenticated.into()),
        }
    }
}
