//! Grouping users by department

use crate::User;
use std::collections::BTreeMap;

/// Users keyed by department name
pub type Departments = BTreeMap<String, Vec<User>>;

/// Group users by `company.department`
///
/// Every user lands in exactly one group and each group keeps the input
/// order.
pub fn group_by_department(users: Vec<User>) -> Departments {
    users.into_iter().fold(Departments::new(), |mut acc, user| {
        acc.entry(user.company.department.clone())
            .or_default()
            .push(user);
        acc
    })
}

/// Department names in byte order
pub fn department_list(departments: &Departments) -> Vec<&str> {
    departments.keys().map(String::as_str).collect()
}

/// Total number of users across all groups
pub fn user_count(departments: &Departments) -> usize {
    departments.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::fixtures::user;

    #[test]
    fn test_grouping_keeps_input_order() {
        let users = vec![
            user(1, "A", "One", "Sales"),
            user(2, "B", "Two", "Legal"),
            user(3, "C", "Three", "Sales"),
            user(4, "D", "Four", "Sales"),
        ];

        let groups = group_by_department(users);

        assert_eq!(department_list(&groups), vec!["Legal", "Sales"]);
        let sales: Vec<u64> = groups["Sales"].iter().map(|u| u.id).collect();
        assert_eq!(sales, vec![1, 3, 4]);
        assert_eq!(user_count(&groups), 4);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_department(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(user_count(&groups), 0);
    }

    #[test]
    fn test_department_names_are_exact() {
        let groups = group_by_department(vec![
            user(1, "A", "One", "Sales"),
            user(2, "B", "Two", "sales"),
        ]);
        assert_eq!(groups.len(), 2);
    }
}
