//! Pure aggregations over a materialized employee collection.
//!
//! # Responsibilities
//! - Case-insensitive name search, preserving upstream order
//! - Maximum salary with a deliberate zero default
//! - Top-N names by salary with stable tie-breaking
//!
//! # Design Decisions
//! - No upstream interaction; callers fetch first, then aggregate
//! - Absent salaries sort last; absent names are kept, not filtered

use crate::model::Employee;

/// Keep employees whose name contains `fragment`, case-insensitively.
///
/// Employees with an absent name never match; the empty fragment matches
/// every employee that has a name. Upstream ordering is preserved.
pub fn search_by_name(mut employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees.retain(|e| {
        e.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    });
    employees
}

/// Maximum of all present salaries; 0 for an empty collection or one where
/// every salary is absent. The zero default is deliberate, not an error.
pub fn max_salary(employees: &[Employee]) -> u32 {
    employees
        .iter()
        .filter_map(|e| e.salary)
        .max()
        .unwrap_or(0)
}

/// Names of the `n` highest-paid employees, highest salary first.
///
/// The sort is stable: equal salaries keep their original relative order,
/// and absent salaries sort last. Names come back as-is, absent ones
/// included.
pub fn top_n_by_salary(mut employees: Vec<Employee>, n: usize) -> Vec<Option<String>> {
    // Option<u32> orders None lowest, so comparing b to a yields a
    // descending order with absent salaries at the end.
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees
        .into_iter()
        .take(n)
        .map(|e| e.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: Option<&str>, salary: Option<u32>) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.map(str::to_string),
            salary,
            age: None,
            title: None,
            email: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let employees = vec![
            employee("1", Some("Bill Bob"), None),
            employee("2", Some("Tia Marsh"), None),
            employee("3", Some("billie holiday"), None),
        ];
        let found = search_by_name(employees, "BILL");
        let names: Vec<_> = found.iter().map(|e| e.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["Bill Bob", "billie holiday"]);
    }

    #[test]
    fn search_skips_absent_names_and_empty_fragment_matches_named() {
        let employees = vec![
            employee("1", Some("Ana"), None),
            employee("2", None, None),
            employee("3", Some("Ben"), None),
        ];
        let found = search_by_name(employees, "");
        let names: Vec<_> = found.iter().map(|e| e.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["Ana", "Ben"], "original order preserved");
    }

    #[test]
    fn max_salary_defaults_to_zero() {
        assert_eq!(max_salary(&[]), 0);
        let all_absent = vec![employee("1", Some("A"), None), employee("2", None, None)];
        assert_eq!(max_salary(&all_absent), 0);
    }

    #[test]
    fn max_salary_ignores_absent_values() {
        let employees = vec![
            employee("1", Some("A"), Some(70)),
            employee("2", Some("B"), None),
            employee("3", Some("C"), Some(90)),
        ];
        assert_eq!(max_salary(&employees), 90);
    }

    #[test]
    fn top_n_sorts_descending_with_stable_ties() {
        let employees = vec![
            employee("1", Some("A"), Some(50)),
            employee("2", Some("B"), Some(90)),
            employee("3", Some("C"), Some(50)),
            employee("4", Some("D"), Some(70)),
        ];
        let names = top_n_by_salary(employees, 10);
        assert_eq!(
            names,
            vec![
                Some("B".to_string()),
                Some("D".to_string()),
                Some("A".to_string()),
                Some("C".to_string()),
            ],
            "A and C tie at 50 and keep their original relative order"
        );
    }

    #[test]
    fn top_n_truncates_and_keeps_absent_names() {
        let employees = vec![
            employee("1", None, Some(80)),
            employee("2", Some("B"), Some(90)),
            employee("3", Some("C"), Some(10)),
        ];
        let names = top_n_by_salary(employees, 2);
        assert_eq!(names, vec![Some("B".to_string()), None]);
    }

    #[test]
    fn top_n_sorts_absent_salaries_last() {
        let employees = vec![
            employee("1", Some("A"), None),
            employee("2", Some("B"), Some(1)),
        ];
        let names = top_n_by_salary(employees, 10);
        assert_eq!(names, vec![Some("B".to_string()), Some("A".to_string())]);
    }
}
