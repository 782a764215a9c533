use serde_json::{json, Value};

use super::DomainQuery;
use crate::errors::AppError;

pub const SUCCESS_MESSAGE: &str = "Employee profile fetched successfully.";

/// `getEmployeeDetails` for one employee code.
#[derive(Debug, Clone)]
pub struct ProfileQuery {
    pub emp_code: String,
}

impl ProfileQuery {
    pub fn new(emp_code: &str) -> Self {
        Self {
            emp_code: emp_code.trim().to_string(),
        }
    }
}

impl DomainQuery for ProfileQuery {
    const DOCUMENT: &'static str = include_str!("queries/employee_details.graphql");
    const OPERATION_FIELD: &'static str = "getEmployeeDetails";
    const NOT_FOUND: &'static str = "No employee data found for the provided employee code.";

    fn subject(&self) -> &str {
        &self.emp_code
    }

    fn variables(&self) -> Value {
        json!({ "empCode": self.emp_code })
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.emp_code.is_empty() {
            return Err(AppError::invalid_argument("Employee code is required"));
        }
        Ok(())
    }
}
