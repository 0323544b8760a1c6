use clap::Parser;

use crate::{context::ShopctlContext, ShopctlOutput, ShopctlResult};

#[derive(Debug, Parser)]
/// Log out
///
/// Asks the auth service to revoke the stored refresh token, then deletes
/// the credential file. The local session is removed even when the auth
/// service can't be reached.
pub struct Logout {}

impl Logout {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        let outcome = context.lifecycle.logout().await?;
        Ok(ShopctlOutput::Logout(outcome))
    }
}
