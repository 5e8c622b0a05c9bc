//! Search, department filter and sort over grouped users

use crate::{DepartmentSummary, Departments, User};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which departments to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    /// Every department
    #[default]
    All,

    /// One department, matched exactly
    Only(String),
}

impl DepartmentFilter {
    /// `None` or `"all"` mean every department
    pub fn from_option(department: Option<&str>) -> Self {
        match department {
            None => DepartmentFilter::All,
            Some(name) if name.eq_ignore_ascii_case("all") => DepartmentFilter::All,
            Some(name) => DepartmentFilter::Only(name.to_string()),
        }
    }

    /// True if the filter selects everything
    pub fn is_all(&self) -> bool {
        matches!(self, DepartmentFilter::All)
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentFilter::All => write!(f, "All Departments"),
            DepartmentFilter::Only(name) => write!(f, "{}", name),
        }
    }
}

/// Direction of the department sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// A to Z
    #[default]
    Asc,

    /// Z to A
    Desc,
}

impl SortOrder {
    /// The other direction
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "a-z" => Ok(SortOrder::Asc),
            "desc" | "z-a" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Compare department names ignoring case, falling back to byte order
pub fn compare_departments(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// One department in a query result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentGroup {
    /// Department name
    pub name: String,

    /// Matching users, in input order
    pub users: Vec<User>,
}

impl DepartmentGroup {
    /// Distinct companies and positions for this group
    pub fn summary(&self) -> DepartmentSummary {
        DepartmentSummary::from_users(&self.name, &self.users)
    }
}

/// Counts shown above a query result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Users shown
    pub users: usize,

    /// Departments shown
    pub departments: usize,
}

/// Result of applying a [`DirectoryQuery`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryView {
    /// Non-empty groups in display order
    pub groups: Vec<DepartmentGroup>,
}

impl DirectoryView {
    /// Users and departments shown
    pub fn totals(&self) -> Totals {
        Totals {
            users: self.groups.iter().map(|group| group.users.len()).sum(),
            departments: self.groups.len(),
        }
    }

    /// True if nothing matched
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Search text, department filter and sort order
///
/// # Examples
///
/// ```
/// use bucketeer_directory::{DirectoryQuery, SortOrder};
///
/// let query = DirectoryQuery::new()
///     .with_search("manager")
///     .with_department("Engineering")
///     .with_order(SortOrder::Desc);
/// assert!(!query.is_unfiltered());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    /// Case-insensitive substring over name, email, company and title
    pub search: String,

    /// Departments to include
    pub department: DepartmentFilter,

    /// Sort direction for department names
    pub order: SortOrder,
}

impl DirectoryQuery {
    /// Query that shows everything, A to Z
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to one department (`"all"` clears the restriction)
    pub fn with_department(mut self, department: &str) -> Self {
        self.department = DepartmentFilter::from_option(Some(department));
        self
    }

    /// Set the sort direction
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// True if neither search nor department filter is active
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.department.is_all()
    }

    /// Filter and sort grouped users
    ///
    /// Groups left empty by the search are dropped. A department that does
    /// not exist yields an empty view.
    pub fn apply(&self, departments: &Departments) -> DirectoryView {
        let mut groups: Vec<DepartmentGroup> = departments
            .iter()
            .filter(|(name, _)| match &self.department {
                DepartmentFilter::All => true,
                DepartmentFilter::Only(wanted) => *name == wanted,
            })
            .map(|(name, users)| DepartmentGroup {
                name: name.clone(),
                users: users
                    .iter()
                    .filter(|user| user.matches_search(&self.search))
                    .cloned()
                    .collect(),
            })
            .filter(|group| !group.users.is_empty())
            .collect();

        groups.sort_by(|a, b| match self.order {
            SortOrder::Asc => compare_departments(&a.name, &b.name),
            SortOrder::Desc => compare_departments(&b.name, &a.name),
        });

        tracing::debug!(
            "Query (search: {:?}, department: {}, order: {:?}) matched {} departments",
            self.search,
            self.department,
            self.order,
            groups.len()
        );

        DirectoryView { groups }
    }
}
