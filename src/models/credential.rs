use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A bearer token issued for one subject (employee code).
///
/// Replaced wholesale on regeneration; never mutated in place.
#[derive(Debug, Clone)]
pub struct Credential {
    pub subject: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(subject: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            token: token.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Expired once `threshold` or more has passed since issuance.
    pub fn is_expired_at(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.elapsed_at(now) >= threshold
    }

    /// Reusable for `subject` at `now`: same subject and not yet expired.
    pub fn is_valid_for(&self, subject: &str, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.subject == subject && !self.is_expired_at(now, threshold)
    }
}

/// Read-only view of the cached credential. Never carries the token itself.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TokenInfo {
    NoToken,
    Active {
        employee_code: String,
        issued_at: DateTime<Utc>,
        elapsed_hours: f64,
        remaining_hours: f64,
        is_expired: bool,
    },
}

impl TokenInfo {
    pub fn describe(
        credential: &Credential,
        now: DateTime<Utc>,
        expiry_hours: f64,
        threshold: Duration,
    ) -> Self {
        let elapsed_hours = credential.elapsed_at(now).num_milliseconds() as f64 / 3_600_000.0;
        TokenInfo::Active {
            employee_code: credential.subject.clone(),
            issued_at: credential.issued_at,
            elapsed_hours: round2(elapsed_hours),
            remaining_hours: round2(expiry_hours - elapsed_hours),
            is_expired: credential.is_expired_at(now, threshold),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
