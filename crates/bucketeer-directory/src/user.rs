//! User records as served by the directory API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic coordinates of an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,

    /// Longitude
    pub lng: f64,
}

/// Postal address; every field is optional in the upstream data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// State abbreviation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,

    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Address {
    /// Single-line rendering of the parts that are present
    pub fn one_line(&self) -> String {
        [&self.address, &self.city, &self.state_code, &self.postal_code]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Where a user works
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Department, the grouping key
    pub department: String,

    /// Company name
    pub name: String,

    /// Job title
    pub title: String,

    /// Office address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// One person in the directory
///
/// Fields the directory does not use are kept in `extra` so records
/// survive a JSON round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Upstream id
    pub id: u64,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Birth date as sent by the API, e.g. `1996-5-30`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Gender as sent by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Home address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Employer
    pub company: Company,

    /// Everything else in the upstream record
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl User {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department the user belongs to
    pub fn department(&self) -> &str {
        &self.company.department
    }

    /// Age in whole years on `today`, if the birth date is usable
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date
            .as_deref()
            .and_then(|birth| crate::age::age_on(birth, today))
    }

    /// True if the search term occurs in the name, email, company or title
    ///
    /// Matching ignores case. An empty term matches everyone.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            self.full_name(),
            self.email.clone(),
            self.company.name.clone(),
            self.company.title.clone(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a user without going through JSON
    pub fn user(id: u64, first: &str, last: &str, department: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@example.com", first, last).to_lowercase(),
            phone: None,
            birth_date: None,
            gender: None,
            address: None,
            company: Company {
                department: department.to_string(),
                name: "Acme".to_string(),
                title: "Engineer".to_string(),
                address: None,
            },
            extra: BTreeMap::new(),
        }
    }
}
