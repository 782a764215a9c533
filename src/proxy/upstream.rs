//! HTTP client shared by token issuance, GraphQL and policy search calls.
//! No transport-level retries; the GraphQL client owns its single retry.

use std::time::Duration;

use anyhow::Context;

pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(32)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .build()
        .context("failed to build HTTP client")
}

/// Read a response fully, returning the status alongside the raw body text.
pub async fn read_response(resp: reqwest::Response) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
    let status = resp.status();
    let body = resp.text().await?;
    Ok((status, body))
}
