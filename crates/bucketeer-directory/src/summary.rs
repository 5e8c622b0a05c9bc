//! Per-department summary figures

use crate::User;
use serde::Serialize;

/// Headline numbers for one department
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    /// Department name
    pub name: String,

    /// Number of users
    pub users: usize,

    /// Distinct company names, first-seen order
    pub companies: Vec<String>,

    /// Distinct job titles, first-seen order
    pub positions: Vec<String>,
}

impl DepartmentSummary {
    /// Summarize a department's users
    pub fn from_users(name: &str, users: &[User]) -> Self {
        Self {
            name: name.to_string(),
            users: users.len(),
            companies: distinct(users.iter().map(|user| user.company.name.as_str())),
            positions: distinct(users.iter().map(|user| user.company.title.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|existing| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
