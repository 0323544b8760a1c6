use async_trait::async_trait;
use lockbox::{mask_token, CredentialOrigin, Lockbox, TokenRecord, UserProfile};
use shopctl_oauth::{AuthClient, DeviceAuthorizationSession, TokenGrant};

use super::{AuthError, TokenProvider};

/// Owns the stored session: hands out access tokens, refreshes them when
/// they lapse and forgets them when they can't be refreshed.
#[derive(Debug, Clone)]
pub struct TokenLifecycle {
    lockbox: Lockbox,
    override_token: Option<String>,
    auth: AuthClient,
}

/// What `logout` managed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// the refresh token was revoked and the store cleared
    Revoked,
    /// the store was cleared but the server did not confirm revocation
    ClearedLocally,
    /// nothing was stored
    NotLoggedIn,
}

impl TokenLifecycle {
    /// `auth` must talk to the auth service directly, not through the
    /// authentication layer this lifecycle feeds.
    pub fn new(config: &lockbox::Config, auth: AuthClient) -> TokenLifecycle {
        TokenLifecycle {
            lockbox: config.lockbox(),
            override_token: config.override_token.clone(),
            auth,
        }
    }

    pub fn lockbox(&self) -> &Lockbox {
        &self.lockbox
    }

    pub fn auth_client(&self) -> &AuthClient {
        &self.auth
    }

    pub fn credential_origin(&self) -> CredentialOrigin {
        match self.override_token {
            Some(_) => CredentialOrigin::EnvVar,
            None => CredentialOrigin::CredentialFile(self.lockbox.path().to_path_buf()),
        }
    }

    pub fn override_token(&self) -> Option<&str> {
        self.override_token.as_deref()
    }

    /// The stored token pair, treating an unreadable store as empty
    pub fn stored_tokens(&self) -> Result<Option<TokenRecord>, AuthError> {
        match self.lockbox.load_tokens() {
            Ok(tokens) => Ok(tokens),
            Err(problem) if problem.is_corrupt() => {
                tracing::warn!(%problem, "discarding unreadable credentials");
                self.lockbox.clear()?;
                Ok(None)
            }
            Err(problem) => Err(problem.into()),
        }
    }

    /// The cached profile of the logged-in user, if any
    pub fn stored_user(&self) -> Result<Option<UserProfile>, AuthError> {
        match self.lockbox.load_user() {
            Ok(user) => Ok(user),
            Err(problem) if problem.is_corrupt() => Ok(None),
            Err(problem) => Err(problem.into()),
        }
    }

    pub fn save_user(&self, user: &UserProfile) -> Result<(), AuthError> {
        Ok(self.lockbox.save_user(user)?)
    }

    /// Polls `session` to completion and replaces the stored session, cached
    /// profile included, with the granted tokens.
    pub async fn login(
        &self,
        session: &mut DeviceAuthorizationSession,
    ) -> Result<TokenRecord, AuthError> {
        let grant = self.auth.poll_for_token(session).await?;
        let record = Self::record_of(grant);
        self.lockbox.start_session(&record)?;
        tracing::debug!(
            access_token = %mask_token(record.access_token()),
            expires_at = %record.expires_at(),
            "stored new session"
        );
        Ok(record)
    }

    /// Revokes the stored refresh token, best effort, and forgets everything.
    pub async fn logout(&self) -> Result<LogoutOutcome, AuthError> {
        let tokens = self.stored_tokens()?;
        let outcome = match &tokens {
            None => LogoutOutcome::NotLoggedIn,
            Some(tokens) => match self.auth.revoke(tokens.refresh_token()).await {
                Ok(()) => LogoutOutcome::Revoked,
                Err(error) => {
                    tracing::warn!(%error, "could not revoke the refresh token");
                    LogoutOutcome::ClearedLocally
                }
            },
        };
        self.lockbox.clear()?;
        Ok(outcome)
    }

    fn record_of(grant: TokenGrant) -> TokenRecord {
        TokenRecord::issue_now(grant.access_token, grant.refresh_token, grant.expires_in)
    }

    async fn refresh(&self, tokens: TokenRecord) -> Result<Option<String>, AuthError> {
        tracing::debug!(expires_at = %tokens.expires_at(), "access token expired, refreshing");
        match self.auth.refresh(tokens.refresh_token()).await {
            Ok(grant) => {
                let record = Self::record_of(grant);
                self.lockbox.save_tokens(&record)?;
                tracing::debug!(access_token = %mask_token(record.access_token()), "refreshed");
                Ok(Some(record.access_token().clone()))
            }
            Err(error) if error.is_transport() => {
                tracing::warn!(%error, "refresh failed before reaching the auth service");
                self.lockbox.clear()?;
                Err(AuthError::OAuth(error))
            }
            Err(error) => {
                tracing::warn!(%error, "refresh rejected, clearing stored session");
                self.lockbox.clear()?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TokenProvider for TokenLifecycle {
    async fn ensure_valid_token(&self) -> Result<Option<String>, AuthError> {
        if let Some(token) = &self.override_token {
            return Ok(Some(token.clone()));
        }
        match self.stored_tokens()? {
            None => Ok(None),
            Some(tokens) if !tokens.is_expired() => Ok(Some(tokens.access_token().clone())),
            Some(tokens) => self.refresh(tokens).await,
        }
    }
}
