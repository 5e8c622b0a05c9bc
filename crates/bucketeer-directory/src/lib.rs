//! Bucketeer Directory
//!
//! A user directory: fetch people from a remote API, group them by
//! department, then search, filter and sort the groups.
//!
//! # Architecture
//!
//! - [`DirectoryClient`]: HTTP fetch with retries, behind the [`UserSource`] trait
//! - [`group_by_department`]: one group per department, input order kept
//! - [`DirectoryQuery`]: search text, department filter and sort order
//! - [`DepartmentSummary`]: distinct companies and positions per department
//! - [`age::age_on`]: display age from a birth date
//!
//! # Examples
//!
//! ```
//! use bucketeer_directory::{DirectoryQuery, SortOrder, StaticSource, UserSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), bucketeer_directory::DirectoryError> {
//! let source = StaticSource::from_json(r#"{"users": [{
//!     "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
//!     "company": { "department": "Engineering", "name": "Engines", "title": "Programmer" }
//! }]}"#)?;
//!
//! let departments = source.load_departments().await?;
//! let view = DirectoryQuery::new()
//!     .with_search("ada")
//!     .with_order(SortOrder::Desc)
//!     .apply(&departments);
//!
//! assert_eq!(view.totals().users, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod age;
pub mod client;
pub mod config;
pub mod group;
pub mod query;
pub mod summary;
pub mod user;

use thiserror::Error;

pub use client::{DirectoryClient, StaticSource, UserSource};
pub use config::DirectoryConfig;
pub use group::{department_list, group_by_department, user_count, Departments};
pub use query::{
    DepartmentFilter, DepartmentGroup, DirectoryQuery, DirectoryView, SortOrder, Totals,
};
pub use summary::DepartmentSummary;
pub use user::{Address, Company, User};

/// Errors that can occur while loading the directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The API answered with something that is not a user list
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The API refused the request
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON from a local source
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DirectoryError {
    /// True if trying again later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, DirectoryError::Communication(_))
    }
}
