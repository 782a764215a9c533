use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the HRIS API. Both `/auth/generatetokenforuser` and
    /// `/graphql` hang off this.
    pub base_api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Domain used for token issuance when a request does not name one.
    pub default_domain: String,
    /// Nominal lifetime of an issued token. Set via TOKEN_EXPIRY_HOURS. Default: 24.
    pub token_expiry_hours: f64,
    /// Tokens are treated as expired this long before their nominal expiry.
    /// Set via TOKEN_SAFETY_MARGIN_MINUTES. Default: 30.
    pub token_safety_margin_minutes: u64,
    pub policy_search_api: String,
    /// Per-request timeout for every upstream call, in seconds. Default: 30.
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Age at which a cached token stops being reused.
    ///
    /// Errors when the configured lifetime or margin does not fit a
    /// `chrono::Duration`, or when the margin swallows the whole lifetime.
    pub fn expiry_threshold(&self) -> anyhow::Result<chrono::Duration> {
        let nominal_secs = self.token_expiry_hours * 3600.0;
        let nominal = if nominal_secs.is_finite() && nominal_secs.abs() < i64::MAX as f64 {
            chrono::Duration::try_seconds(nominal_secs as i64)
        } else {
            None
        };
        let margin = i64::try_from(self.token_safety_margin_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes);

        let threshold = nominal
            .zip(margin)
            .and_then(|(nominal, margin)| nominal.checked_sub(&margin))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "TOKEN_EXPIRY_HOURS ({}) or TOKEN_SAFETY_MARGIN_MINUTES ({}) is out of range",
                    self.token_expiry_hours,
                    self.token_safety_margin_minutes
                )
            })?;

        if threshold <= chrono::Duration::zero() {
            anyhow::bail!(
                "TOKEN_EXPIRY_HOURS ({}) must exceed the safety margin of {} minutes",
                self.token_expiry_hours,
                self.token_safety_margin_minutes
            );
        }
        Ok(threshold)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            base_api_url: "https://honoapp.honohr.com/api".into(),
            client_id: None,
            client_secret: None,
            default_domain: "honoenterpriseapp.honohr.com".into(),
            token_expiry_hours: 24.0,
            token_safety_margin_minutes: 30,
            policy_search_api: "https://devgpt.honohr.com/genaisearch/rfpsearch/".into(),
            upstream_timeout_secs: 30,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let defaults = Config::default();

    let base_api_url = std::env::var("BASE_URL").unwrap_or(defaults.base_api_url);
    url::Url::parse(&base_api_url)
        .map_err(|e| anyhow::anyhow!("BASE_URL '{}' is not a valid URL: {}", base_api_url, e))?;

    let client_id = std::env::var("CLIENT_ID").ok().filter(|s| !s.is_empty());
    let client_secret = std::env::var("CLIENT_SECRET").ok().filter(|s| !s.is_empty());
    if client_id.is_none() || client_secret.is_none() {
        eprintln!("⚠️  CLIENT_ID / CLIENT_SECRET not set; token issuance will be rejected upstream.");
    }

    let cfg = Config {
        port: std::env::var("HRIS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port),
        base_api_url,
        client_id,
        client_secret,
        default_domain: std::env::var("DEFAULT_DOMAIN").unwrap_or(defaults.default_domain),
        token_expiry_hours: std::env::var("TOKEN_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_expiry_hours),
        token_safety_margin_minutes: std::env::var("TOKEN_SAFETY_MARGIN_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_safety_margin_minutes),
        policy_search_api: std::env::var("POLICY_SEARCH_API")
            .unwrap_or(defaults.policy_search_api),
        upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.upstream_timeout_secs),
    };

    cfg.expiry_threshold()?;

    Ok(cfg)
}
