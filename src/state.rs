use std::sync::Arc;

use reqwest::Client as ReqwestClient;

use crate::config::Config;

/// Shared application state passed to all handlers.
/// The HTTP client is built once so requests reuse its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub http_client: ReqwestClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http_client = ReqwestClient::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            // Redirects are followed by the fetcher so each hop can be vetted.
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(AppState {
            http_client,
            config: Arc::new(config),
        })
    }
}
