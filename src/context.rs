use std::{sync::Arc, time::Duration};

use camino::Utf8PathBuf;
use http::{header, HeaderMap, HeaderValue};
use shopctl_http::{
    body::APPLICATION_JSON, default_headers::DefaultHeadersLayer, HttpService,
    HttpServiceConfig, ReqwestService,
};
use shopctl_oauth::{AuthClient, AuthServerConfig};
use tower::{util::BoxCloneSyncService, ServiceBuilder};
use url::Url;

use crate::{
    auth::{AuthenticateLayer, TokenLifecycle},
    client::ApiClient,
    utils::env::{ShopctlEnv, ShopctlEnvKey},
    ShopctlResult,
};

pub const DEFAULT_AUTH_URL: &str = "https://auth.shopctl.dev";
pub const DEFAULT_API_URL: &str = "https://api.shopctl.dev";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a command needs, built once per invocation
#[derive(Clone)]
pub struct ShopctlContext {
    pub config: lockbox::Config,
    pub auth_server: AuthServerConfig,
    pub api_url: Url,
    pub lifecycle: Arc<TokenLifecycle>,
    transport: HttpService,
}

impl ShopctlContext {
    /// Builds a context that talks to the network through reqwest
    pub fn new(env: &ShopctlEnv) -> ShopctlResult<ShopctlContext> {
        let service = ReqwestService::builder()
            .config(HttpServiceConfig::builder().timeout(REQUEST_TIMEOUT).build())
            .build()?;
        ShopctlContext::with_transport(env, service.into())
    }

    /// Builds a context around an arbitrary transport
    pub fn with_transport(env: &ShopctlEnv, transport: HttpService) -> ShopctlResult<ShopctlContext> {
        let override_home = env.get(ShopctlEnvKey::ConfigHome)?.map(Utf8PathBuf::from);
        let override_token = env.get(ShopctlEnvKey::Token)?;
        let config = lockbox::Config::new(override_home.as_ref(), override_token)?;

        let auth_url = env
            .get(ShopctlEnvKey::AuthUrl)?
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
        let mut auth_server = AuthServerConfig::new(Url::parse(&auth_url)?);
        if let Some(client_id) = env.get(ShopctlEnvKey::ClientId)? {
            auth_server = auth_server.with_client_id(client_id);
        }
        let api_url = env
            .get(ShopctlEnvKey::ApiUrl)?
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)?;

        let transport = BoxCloneSyncService::new(
            ServiceBuilder::new()
                .layer(DefaultHeadersLayer::new(default_headers()))
                .service(transport),
        );
        let auth_client = AuthClient::new(transport.clone(), auth_server.clone());
        let lifecycle = Arc::new(TokenLifecycle::new(&config, auth_client));

        tracing::debug!(home = %config.home, %auth_url, %api_url, "built context");
        Ok(ShopctlContext {
            config,
            auth_server,
            api_url,
            lifecycle,
            transport,
        })
    }

    fn authenticated_service(&self) -> HttpService {
        BoxCloneSyncService::new(
            ServiceBuilder::new()
                .layer(AuthenticateLayer::new(self.lifecycle.clone()))
                .service(self.transport.clone()),
        )
    }

    /// Client for the authenticated endpoints of the auth service
    pub fn identity_client(&self) -> ApiClient {
        ApiClient::new(self.authenticated_service(), self.auth_server.base_url.clone())
    }

    /// Client for the commerce API
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.authenticated_service(), self.api_url.clone())
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let user_agent = format!("shopctl/{}", env!("CARGO_PKG_VERSION"));
    if let Ok(value) = HeaderValue::from_str(&user_agent) {
        headers.insert(header::USER_AGENT, value);
    }
    headers.insert(header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers
}
