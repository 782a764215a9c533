use serde_json::{json, Value};

use super::DomainQuery;
use crate::errors::AppError;

pub const SUCCESS_MESSAGE: &str = "Team details fetched successfully.";
pub const DEFAULT_STATUS_CODE: &str = "01";

/// `getTeamDetailsList` for a manager over a date range.
#[derive(Debug, Clone)]
pub struct TeamQuery {
    pub emp_code: String,
    pub start_date: String,
    pub end_date: String,
    pub status_code: String,
}

impl TeamQuery {
    /// Blank `status_code` falls back to [`DEFAULT_STATUS_CODE`].
    pub fn new(emp_code: &str, start_date: &str, end_date: &str, status_code: &str) -> Self {
        let status_code = match status_code.trim() {
            "" => DEFAULT_STATUS_CODE,
            s => s,
        };
        Self {
            emp_code: emp_code.trim().to_string(),
            start_date: start_date.trim().to_string(),
            end_date: end_date.trim().to_string(),
            status_code: status_code.to_string(),
        }
    }
}

impl DomainQuery for TeamQuery {
    const DOCUMENT: &'static str = include_str!("queries/team_details.graphql");
    const OPERATION_FIELD: &'static str = "getTeamDetailsList";
    const NOT_FOUND: &'static str = "No team data found for the provided criteria.";

    fn subject(&self) -> &str {
        &self.emp_code
    }

    fn variables(&self) -> Value {
        json!({
            "employeeInput": {
                "empCode": self.emp_code,
                "startDate": self.start_date,
                "endDate": self.end_date,
                "statusCode": self.status_code,
            }
        })
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.emp_code.is_empty() || self.start_date.is_empty() || self.end_date.is_empty() {
            return Err(AppError::invalid_argument(
                "Employee code, start date, and end date are required",
            ));
        }
        Ok(())
    }
}
