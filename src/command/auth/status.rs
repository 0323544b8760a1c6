use clap::Parser;
use lockbox::CredentialOrigin;

use crate::{
    command::output::AuthStatus, context::ShopctlContext, ShopctlOutput, ShopctlResult,
};

#[derive(Debug, Parser)]
/// Show where credentials come from and whether they are still valid
pub struct Status {}

impl Status {
    pub fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        let lifecycle = &context.lifecycle;
        let origin = lifecycle.credential_origin();

        let status = match &origin {
            // the cached profile belongs to the stored session, not the override
            CredentialOrigin::EnvVar => AuthStatus {
                origin,
                logged_in: true,
                expires_at: None,
                expired: None,
                access_token: lifecycle.override_token().map(str::to_string),
                user: None,
            },
            CredentialOrigin::CredentialFile(_) => {
                let tokens = lifecycle.stored_tokens()?;
                AuthStatus {
                    logged_in: tokens.is_some(),
                    expires_at: tokens.as_ref().map(|tokens| *tokens.expires_at()),
                    expired: tokens.as_ref().map(|tokens| tokens.is_expired()),
                    access_token: tokens.map(|tokens| tokens.access_token().clone()),
                    origin,
                    user: lifecycle.stored_user()?,
                }
            }
        };
        Ok(ShopctlOutput::AuthStatus(status))
    }
}
