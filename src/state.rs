use std::sync::Arc;

use crate::auth::{TokenManager, TokenSource};
use crate::config::Config;
use crate::proxy::graphql::GraphqlClient;
use crate::proxy::upstream::build_http_client;
use crate::tools::{HrisQueries, PolicySearch};

/// Shared application state passed to handlers, the tool surface and the CLI.
pub struct AppState {
    pub config: Config,
    pub tokens: Arc<TokenManager>,
    pub hris: HrisQueries,
    pub policy: PolicySearch,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = build_http_client(config.upstream_timeout())?;

        let tokens = Arc::new(TokenManager::new(&config, http.clone())?);
        let source: Arc<dyn TokenSource> = tokens.clone();
        let graphql = Arc::new(GraphqlClient::new(&config.base_api_url, http.clone(), source));

        tracing::info!(
            graphql = %graphql.endpoint(),
            threshold_minutes = config.expiry_threshold()?.num_minutes(),
            "HRIS upstream configured"
        );

        Ok(Self {
            hris: HrisQueries::new(graphql),
            policy: PolicySearch::new(config.policy_search_api.clone(), http),
            tokens,
            config,
        })
    }

    /// Domain to issue tokens for when the caller gave none.
    pub fn domain_or_default<'a>(&'a self, domain_url: Option<&'a str>) -> &'a str {
        match domain_url.map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => &self.config.default_domain,
        }
    }
}
