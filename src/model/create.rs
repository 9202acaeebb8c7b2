//! Employee creation request and its input constraints.

use serde::{Deserialize, Serialize};

pub const MIN_SALARY: u32 = 1;
pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 75;

/// Payload a caller must provide to create a new employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

/// A single rejected field, reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl CreateRequest {
    /// Check all field constraints, collecting every violation rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "must not be blank".to_string(),
            });
        }
        if self.salary < MIN_SALARY {
            errors.push(FieldError {
                field: "salary",
                message: format!("must be at least {MIN_SALARY}"),
            });
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            errors.push(FieldError {
                field: "age",
                message: format!("must be between {MIN_AGE} and {MAX_AGE}"),
            });
        }
        if self.title.trim().is_empty() {
            errors.push(FieldError {
                field: "title",
                message: "must not be blank".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
