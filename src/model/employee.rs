//! Employee record as returned by the upstream service.

use serde::{Deserialize, Serialize};

/// A single employee record.
///
/// The upstream service prefixes every field except `id` with `employee_`,
/// and any of those fields may be missing from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: Option<String>,

    #[serde(rename = "employee_salary")]
    pub salary: Option<u32>,

    #[serde(rename = "employee_age")]
    pub age: Option<u32>,

    #[serde(rename = "employee_title")]
    pub title: Option<String>,

    #[serde(rename = "employee_email")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_upstream_field_names() {
        let json = r#"{
            "id": "8c0b46c2-da59-40f7-92c6-91967942007a",
            "employee_name": "Fred Hamill",
            "employee_salary": 66661,
            "employee_age": 26,
            "employee_title": "Product Producer",
            "employee_email": "zontrax@company.com"
        }"#;

        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.name.as_deref(), Some("Fred Hamill"));
        assert_eq!(e.salary, Some(66661));
        assert_eq!(e.email.as_deref(), Some("zontrax@company.com"));
    }

    #[test]
    fn tolerates_absent_fields() {
        let e: Employee = serde_json::from_str(r#"{"id": "x1"}"#).unwrap();
        assert_eq!(e.id, "x1");
        assert!(e.name.is_none());
        assert!(e.salary.is_none());
    }
}
