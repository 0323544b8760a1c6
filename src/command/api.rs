use anyhow::anyhow;
use clap::Parser;
use http::Method;

use crate::{
    context::ShopctlContext, ShopctlError, ShopctlErrorSuggestion, ShopctlOutput, ShopctlResult,
};

#[derive(Debug, Parser)]
/// Make an authenticated request to the commerce API
///
/// The access token is refreshed first when it has expired. The response
/// body is printed as JSON.
pub struct Api {
    /// HTTP method, e.g. GET or POST
    method: String,

    /// Path of the endpoint, e.g. /api/v1/products
    path: String,

    /// JSON request body
    #[arg(long, short = 'd')]
    data: Option<String>,
}

impl Api {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| invalid_input(format!("'{}' is not an HTTP method", self.method)))?;
        if !self.path.starts_with('/') {
            return Err(invalid_input(format!(
                "'{}' must be a path starting with '/'",
                self.path
            )));
        }
        let data = self
            .data
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .map_err(|err| invalid_input(format!("--data is not valid JSON: {err}")))?;

        let response = context
            .api_client()
            .send(method, &self.path, data.as_ref())
            .await?;
        Ok(ShopctlOutput::ApiResponse {
            status: response.status.as_u16(),
            body: response.body,
        })
    }
}

fn invalid_input(message: String) -> ShopctlError {
    let mut error = ShopctlError::new(anyhow!(message));
    error.set_code(crate::ShopctlErrorCode::E010);
    error.set_suggestion(ShopctlErrorSuggestion::Adhoc(
        "Run `shopctl api --help` for usage.".to_string(),
    ));
    error
}
