mod metadata;

pub use metadata::{ShopctlErrorCode, ShopctlErrorMetadata, ShopctlErrorSuggestion};

pub type ShopctlResult<T> = std::result::Result<T, ShopctlError>;

use std::fmt::{self, Display};
use std::io;

use calm_io::stderr;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::utils::style::Style;

/// A specialized `Error` type for shopctl that wraps `anyhow`
/// and provides some extra metadata for end users depending
/// on the specific error they encountered.
#[derive(Serialize, Debug)]
pub struct ShopctlError {
    #[serde(flatten, serialize_with = "serialize_anyhow")]
    error: anyhow::Error,

    #[serde(flatten)]
    metadata: ShopctlErrorMetadata,
}

fn serialize_anyhow<S>(error: &anyhow::Error, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut data = serializer.serialize_struct("error", 1)?;
    data.serialize_field("message", &error.to_string())?;
    data.end()
}

impl ShopctlError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let error = error.into();
        let metadata = ShopctlErrorMetadata::from(&error);

        Self { error, metadata }
    }

    pub fn set_suggestion(&mut self, suggestion: ShopctlErrorSuggestion) {
        self.metadata.suggestion = Some(suggestion);
    }

    pub fn set_code(&mut self, code: ShopctlErrorCode) {
        self.metadata.code = Some(code);
        self.metadata.skip_printing_cause = true;
    }

    pub fn suggestion(&self) -> Option<&ShopctlErrorSuggestion> {
        self.metadata.suggestion.as_ref()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn code(&self) -> Option<ShopctlErrorCode> {
        self.metadata.code
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        self.metadata.code.map_or(1, ShopctlErrorCode::exit_code)
    }

    pub fn print(&self) -> io::Result<()> {
        stderr!("{}", self)?;
        Ok(())
    }
}

impl Display for ShopctlError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_descriptor_message = match &self.metadata.code {
            Some(code) => format!("error[{code}]:"),
            None => "error:".to_string(),
        };
        let error_descriptor = Style::ErrorPrefix.paint(&error_descriptor_message);

        if self.metadata.skip_printing_cause {
            writeln!(formatter, "{} {}", error_descriptor, &self.error)?;
        } else {
            writeln!(formatter, "{} {:?}", error_descriptor, &self.error)?;
        }

        if let Some(suggestion) = &self.metadata.suggestion {
            writeln!(formatter, "        {suggestion}")?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for ShopctlError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use lockbox::LockboxProblem;
    use serde_json::json;
    use shopctl_oauth::OAuthError;
    use speculoos::prelude::*;

    use super::*;
    use crate::auth::AuthError;
    use crate::client::ApiClientError;

    #[test]
    fn authentication_outcomes_are_distinguishable() {
        let not_authenticated = ShopctlError::new(AuthError::NotAuthenticated);
        let denied = ShopctlError::new(AuthError::from(OAuthError::AccessDenied));
        let expired = ShopctlError::new(AuthError::from(OAuthError::AuthorizationExpired));

        assert_that!(not_authenticated.code()).is_equal_to(Some(ShopctlErrorCode::E001));
        assert_that!(denied.code()).is_equal_to(Some(ShopctlErrorCode::E002));
        assert_that!(expired.code()).is_equal_to(Some(ShopctlErrorCode::E003));

        let exits = [
            not_authenticated.exit_code(),
            denied.exit_code(),
            expired.exit_code(),
        ];
        assert_that!(exits).is_equal_to([3, 4, 5]);
    }

    #[test]
    fn a_401_from_the_api_points_at_login() {
        let error = ShopctlError::new(ApiClientError::Auth(AuthError::NotAuthenticated));
        assert_that!(error.code()).is_equal_to(Some(ShopctlErrorCode::E001));
        assert_that!(error.suggestion())
            .is_some()
            .matches(|s| matches!(s, ShopctlErrorSuggestion::RunLogin));
    }

    #[test]
    fn unknown_errors_have_no_code() {
        let error = ShopctlError::new(anyhow::anyhow!("boom"));
        assert_that!(error.code()).is_none();
        assert_that!(error.exit_code()).is_equal_to(1);
    }

    #[test]
    fn serializes_message_and_code() {
        let error = ShopctlError::new(LockboxProblem::DefaultConfigDirNotFound);
        let value = serde_json::to_value(&error).unwrap();
        assert_that!(value["message"])
            .is_equal_to(json!("Could not determine default OS configuration directory."));
        assert_that!(value["code"]).is_equal_to(json!("E008"));
    }
}
