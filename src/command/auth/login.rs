use clap::Parser;
use lockbox::UserProfile;
use shopctl_oauth::config::USER_PROFILE_PATH;

use crate::{
    command::output::note,
    context::ShopctlContext,
    utils::{env::ShopctlEnvKey, style::Style},
    ShopctlOutput, ShopctlResult,
};

#[derive(Debug, Parser)]
/// Log in with the OAuth device flow
///
/// shopctl shows a short code and opens your browser; approve the request
/// there and shopctl stores the resulting session, encrypted, in its config
/// directory.
pub struct Login {
    /// Print the login URL instead of opening a browser
    #[arg(long)]
    no_open: bool,
}

impl Login {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        let lifecycle = &context.lifecycle;
        if lifecycle.override_token().is_some() {
            note(format!(
                "{} {} is set and takes precedence over the session stored by this login.",
                Style::WarningPrefix.paint("WARN:"),
                Style::Command.paint(format!("${}", ShopctlEnvKey::Token))
            ));
        }

        let mut session = lifecycle.auth_client().request_device_code().await?;

        note(format!(
            "To log in, open {} and enter the code {}",
            Style::Link.paint(session.verification_uri()),
            Style::UserCode.paint(session.user_code())
        ));
        if !self.no_open {
            match opener::open(session.browser_uri()) {
                Ok(()) => note("Opened your browser."),
                Err(error) => {
                    tracing::debug!(%error, "could not open a browser");
                    note("Could not open a browser; open the link above manually.");
                }
            }
        }
        note(Style::Pending.paint("Waiting for you to approve the request..."));

        let record = lifecycle.login(&mut session).await?;

        let user = match context
            .identity_client()
            .get_json::<UserProfile>(USER_PROFILE_PATH)
            .await
        {
            Ok(user) => {
                lifecycle.save_user(&user)?;
                Some(user)
            }
            Err(error) => {
                tracing::warn!(%error, "logged in, but could not fetch the user profile");
                None
            }
        };

        Ok(ShopctlOutput::LoginSuccess {
            user,
            expires_at: *record.expires_at(),
        })
    }
}
