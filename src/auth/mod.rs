pub mod token_manager;

use async_trait::async_trait;

use crate::errors::AppError;

pub use token_manager::TokenManager;

/// Source of bearer tokens for upstream HRIS calls.
/// Implementations: TokenManager (cached, single-flight issuance).
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token valid for `subject`, reusing a cached one when possible.
    async fn get_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError>;

    /// Issue a fresh token for `subject`, bypassing any cached credential.
    async fn generate_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError>;
}
