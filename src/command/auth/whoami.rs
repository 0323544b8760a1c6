use clap::Parser;
use lockbox::UserProfile;
use shopctl_oauth::config::USER_PROFILE_PATH;

use crate::{auth::AuthError, context::ShopctlContext, ShopctlOutput, ShopctlResult};

#[derive(Debug, Parser)]
/// Show the logged-in user
///
/// Prints the profile cached at login. With --refresh, or when nothing is
/// cached, the profile is fetched again from the auth service.
pub struct WhoAmI {
    /// Fetch the profile from the auth service instead of the cache
    #[arg(long)]
    refresh: bool,
}

impl WhoAmI {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        let lifecycle = &context.lifecycle;
        let origin = lifecycle.credential_origin();

        // a cached profile belongs to the stored session, not to an override token
        let cached = match lifecycle.override_token() {
            Some(_) => None,
            None => lifecycle.stored_user()?,
        };
        if let (Some(user), false) = (&cached, self.refresh) {
            if lifecycle.stored_tokens()?.is_none() {
                return Err(AuthError::NotAuthenticated.into());
            }
            return Ok(ShopctlOutput::WhoAmI {
                user: user.clone(),
                origin,
            });
        }

        let user: UserProfile = context
            .identity_client()
            .get_json(USER_PROFILE_PATH)
            .await?;
        if lifecycle.override_token().is_none() {
            lifecycle.save_user(&user)?;
        }
        Ok(ShopctlOutput::WhoAmI { user, origin })
    }
}

#[cfg(test)]
mod tests {
    use lockbox::{TokenRecord, UserProfile};
    use serde_json::json;
    use shopctl_oauth::config::USER_PROFILE_PATH;
    use speculoos::prelude::*;

    use super::WhoAmI;
    use crate::command::auth::test_support::{context, context_with, serve_profile};
    use crate::utils::env::ShopctlEnvKey;
    use crate::{ShopctlErrorCode, ShopctlOutput};

    fn user_of(output: ShopctlOutput) -> UserProfile {
        match output {
            ShopctlOutput::WhoAmI { user, .. } => user,
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[tokio::test]
    async fn the_cached_profile_needs_no_network() {
        let test = context();
        let lockbox = test.context.lifecycle.lockbox();
        lockbox.save_tokens(&TokenRecord::issue_now("at1", "rt1", 3600)).unwrap();
        lockbox
            .save_user(&UserProfile {
                id: "u1".to_string(),
                email: "cached@shop.test".to_string(),
                name: String::new(),
                role: String::new(),
            })
            .unwrap();

        let user = user_of(WhoAmI { refresh: false }.run(&test.context).await.unwrap());

        assert_that!(user.email.as_str()).is_equal_to("cached@shop.test");
        assert_that!(test.script.requests()).is_empty();
    }

    #[tokio::test]
    async fn refresh_fetches_and_caches_the_profile() {
        let test = context();
        test.context
            .lifecycle
            .lockbox()
            .save_tokens(&TokenRecord::issue_now("at1", "rt1", 3600))
            .unwrap();
        serve_profile(&test.script);

        let user = user_of(WhoAmI { refresh: true }.run(&test.context).await.unwrap());

        assert_that!(user.email.as_str()).is_equal_to("owner@shop.test");
        let cached = test.context.lifecycle.lockbox().load_user().unwrap();
        assert_that!(cached).is_some().is_equal_to(user);
    }

    #[tokio::test]
    async fn the_override_token_is_sent_and_nothing_is_cached() {
        let test = context_with(&[(ShopctlEnvKey::Token, "env-token")]);
        serve_profile(&test.script);

        WhoAmI { refresh: false }.run(&test.context).await.unwrap();

        assert_that!(test.script.requests_to(USER_PROFILE_PATH)[0].authorization())
            .is_some()
            .is_equal_to("Bearer env-token");
        assert_that!(test.context.config.credentials_path().exists()).is_false();
    }

    #[tokio::test]
    async fn a_401_is_reported_as_not_logged_in() {
        let test = context();
        test.script.respond(USER_PROFILE_PATH, 401, json!({ "error": "unauthorized" }));

        let err = WhoAmI { refresh: false }.run(&test.context).await.unwrap_err();

        assert_that!(err.code()).is_equal_to(Some(ShopctlErrorCode::E001));
        assert_that!(test.script.requests_to(USER_PROFILE_PATH)[0].authorization()).is_none();
    }
}
