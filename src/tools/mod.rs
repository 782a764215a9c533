//! Domain adapters over the resilient GraphQL client.
//!
//! Each adapter owns a query document, builds variables from typed input,
//! validates required fields and names the `data` field to extract. Auth and
//! retry live entirely in [`crate::proxy::graphql`].

pub mod policy;
pub mod profile;
pub mod team;

use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::models::envelope::Envelope;
use crate::proxy::graphql::{extract_operation_field, GraphqlClient, QueryRequest};

pub use policy::PolicySearch;
pub use profile::ProfileQuery;
pub use team::TeamQuery;

/// A fixed HRIS GraphQL query plus the rules for calling it.
pub trait DomainQuery {
    const DOCUMENT: &'static str;
    /// Field under `data` that holds the result.
    const OPERATION_FIELD: &'static str;
    /// Failure message when the upstream answers with nothing.
    const NOT_FOUND: &'static str;

    /// Employee code the call runs as (`contextempcode`).
    fn subject(&self) -> &str;

    fn variables(&self) -> Value;

    /// Reject missing required fields before any network call.
    fn validate(&self) -> Result<(), AppError>;
}

/// Profile and team lookups, sharing one GraphQL client.
#[derive(Clone)]
pub struct HrisQueries {
    graphql: Arc<GraphqlClient>,
}

impl HrisQueries {
    pub fn new(graphql: Arc<GraphqlClient>) -> Self {
        Self { graphql }
    }

    pub async fn run<Q: DomainQuery>(&self, query: &Q, domain_url: &str) -> Result<Value, AppError> {
        query.validate()?;

        let req = QueryRequest::new(Q::DOCUMENT, query.variables(), query.subject(), domain_url);
        let payload = self.graphql.execute(&req).await?;

        extract_operation_field(&payload, Q::OPERATION_FIELD).ok_or_else(|| {
            tracing::warn!(
                emp_code = %query.subject(),
                field = Q::OPERATION_FIELD,
                "No data in GraphQL response"
            );
            AppError::EmptyResult(Q::NOT_FOUND.to_string())
        })
    }

    pub async fn fetch_profile(&self, emp_code: &str, domain_url: &str) -> Result<Value, AppError> {
        tracing::info!(emp_code = %emp_code.trim(), "Profile request received");
        self.run(&ProfileQuery::new(emp_code), domain_url).await
    }

    pub async fn execute_profile_query(&self, emp_code: &str, domain_url: &str) -> Envelope {
        let result = self.fetch_profile(emp_code, domain_url).await;
        log_outcome(&result, "employee profile");
        Envelope::from_result(
            result,
            profile::SUCCESS_MESSAGE,
            "Error fetching employee profile",
        )
    }

    pub async fn fetch_team(
        &self,
        emp_code: &str,
        start_date: &str,
        end_date: &str,
        status_code: &str,
        domain_url: &str,
    ) -> Result<Value, AppError> {
        let query = TeamQuery::new(emp_code, start_date, end_date, status_code);
        tracing::info!(
            emp_code = %query.emp_code,
            start = %query.start_date,
            end = %query.end_date,
            "Team details request received"
        );
        self.run(&query, domain_url).await
    }

    pub async fn execute_team_query(
        &self,
        emp_code: &str,
        start_date: &str,
        end_date: &str,
        status_code: &str,
        domain_url: &str,
    ) -> Envelope {
        let result = self
            .fetch_team(emp_code, start_date, end_date, status_code, domain_url)
            .await;
        log_outcome(&result, "team details");
        Envelope::from_result(result, team::SUCCESS_MESSAGE, "Error fetching team details")
    }
}

fn log_outcome(result: &Result<Value, AppError>, what: &str) {
    match result {
        Ok(_) => tracing::info!("Fetched {} successfully", what),
        Err(AppError::EmptyResult(_)) | Err(AppError::InvalidArgument(_)) => {}
        Err(e) => tracing::error!("Error fetching {}: {}", what, e),
    }
}
