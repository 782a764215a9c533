//! Classification of GraphQL responses for the single auth retry.

use reqwest::StatusCode;

/// Marker the HRIS GraphQL server puts in 400 bodies when the bearer token
/// is no longer accepted.
pub const UNAUTHENTICATED_MARKER: &str = "UNAUTHENTICATED";

/// What to do with one GraphQL response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 200: parse the body.
    Accept,
    /// Upstream rejected the token; regenerate and retry once.
    StaleToken,
    /// Any other status; give up.
    Fail,
}

/// The one place that decides whether a response means "token rejected".
pub fn is_stale_token_signal(status: StatusCode, body: &str) -> bool {
    status == StatusCode::UNAUTHORIZED
        || (status == StatusCode::BAD_REQUEST && body.contains(UNAUTHENTICATED_MARKER))
}

pub fn classify(status: StatusCode, body: &str) -> Verdict {
    if status == StatusCode::OK {
        Verdict::Accept
    } else if is_stale_token_signal(status, body) {
        Verdict::StaleToken
    } else {
        Verdict::Fail
    }
}
