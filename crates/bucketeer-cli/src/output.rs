//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use bucketeer_board::{BoardConfig, BoardSnapshot};
use bucketeer_directory::{DirectoryView, User};
use bucketeer_domain::{Category, Item, Rejection, Transition};
use chrono::NaiveDate;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the three board columns.
    pub fn format_board(&self, snapshot: &BoardSnapshot, config: &BoardConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let column = |category: Category| -> Vec<serde_json::Value> {
                    snapshot.column(category).iter().map(item_json).collect()
                };
                let value = json!({
                    "main": column(Category::Main),
                    "group_a": column(Category::GroupA),
                    "group_b": column(Category::GroupB),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.board_table(snapshot, config)),
            OutputFormat::Quiet => Ok(Category::ALL
                .into_iter()
                .flat_map(|category| {
                    snapshot
                        .column(category)
                        .iter()
                        .map(move |item| format!("{}\t{}", category, item.name))
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn board_table(&self, snapshot: &BoardSnapshot, config: &BoardConfig) -> String {
        let mut builder = Builder::default();
        builder.push_record(Category::ALL.map(|category| {
            format!(
                "{} ({})",
                config.label(category),
                snapshot.column(category).len()
            )
        }));

        let rows = Category::ALL
            .iter()
            .map(|category| snapshot.column(*category).len())
            .max()
            .unwrap_or(0);

        for row in 0..rows {
            builder.push_record(Category::ALL.map(|category| {
                snapshot
                    .column(category)
                    .get(row)
                    .map(|item| format!("{} [{}]", item.name, item.id.short()))
                    .unwrap_or_default()
            }));
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a list of seed items.
    pub fn format_items(&self, items: &[Item]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<_> = items.iter().map(item_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(self.colorize("No items.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Name", "Type", "ID"]);
                for (index, item) in items.iter().enumerate() {
                    builder.push_record([
                        (index + 1).to_string(),
                        item.name.clone(),
                        item.kind.clone(),
                        item.id.short(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|item| item.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a directory query result.
    pub fn format_directory(&self, view: &DirectoryView, today: NaiveDate) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
            OutputFormat::Quiet => Ok(view
                .groups
                .iter()
                .flat_map(|group| {
                    group
                        .users
                        .iter()
                        .map(move |user| format!("{}\t{}", group.name, user.full_name()))
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if view.is_empty() {
                    return Ok(self.warning(
                        "No users found. Try adjusting your search or filter criteria",
                    ));
                }

                let mut sections = Vec::new();
                for group in &view.groups {
                    let summary = group.summary();
                    sections.push(self.colorize(
                        &format!(
                            "{} - {} users, {} companies, {} positions",
                            group.name,
                            summary.users,
                            summary.companies.len(),
                            summary.positions.len()
                        ),
                        "cyan",
                    ));
                    sections.push(self.users_table(&group.users, today));
                }

                let totals = view.totals();
                sections.push(format!(
                    "Showing: {} users | Departments: {}",
                    totals.users, totals.departments
                ));
                Ok(sections.join("\n"))
            }
        }
    }

    fn users_table(&self, users: &[User], today: NaiveDate) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Name", "Email", "Title", "Company", "Age", "Gender"]);

        for user in users {
            builder.push_record([
                user.full_name(),
                user.email.clone(),
                user.company.title.clone(),
                user.company.name.clone(),
                user.age_on(today)
                    .map(|age| age.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                user.gender.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format per-department totals.
    pub fn format_summaries(&self, view: &DirectoryView) -> Result<String> {
        let summaries: Vec<_> = view.groups.iter().map(|group| group.summary()).collect();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&summaries)?),
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| format!("{}\t{}", s.name, s.users))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Department", "Users", "Companies", "Positions"]);
                for summary in &summaries {
                    builder.push_record([
                        summary.name.clone(),
                        summary.users.to_string(),
                        summary.companies.len().to_string(),
                        summary.positions.len().to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format an accepted move.
    pub fn transition(&self, name: &str, transition: &Transition, config: &BoardConfig) -> String {
        self.success(&format!(
            "{}: {} → {}",
            name,
            config.label(transition.from),
            config.label(transition.to)
        ))
    }

    /// Format a declined move.
    pub fn rejection(&self, rejection: &Rejection) -> String {
        self.warning(&format!("Not moved: {}", rejection))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn item_json(item: &Item) -> serde_json::Value {
    json!({
        "id": item.id.to_string(),
        "name": item.name,
        "type": item.kind,
        "done": item.done,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketeer_directory::{group_by_department, DirectoryQuery};

    fn snapshot() -> BoardSnapshot {
        BoardSnapshot {
            main: vec![Item::new("Apple", "Fruit"), Item::new("Bread", "Bakery")],
            group_a: vec![],
            group_b: vec![Item::new("Carrot", "Vegetable")],
        }
    }

    fn view() -> DirectoryView {
        let users = serde_json::from_str(
            r#"[{
                "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
                "birthDate": "1990-12-10", "gender": "female",
                "company": { "department": "Engineering", "name": "Engines", "title": "Programmer" }
            }]"#,
        )
        .unwrap();
        DirectoryQuery::new().apply(&group_by_department(users))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_board_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_board(&snapshot(), &BoardConfig::default())
            .unwrap();
        assert!(output.contains("All Items (2)"));
        assert!(output.contains("Fruits (0)"));
        assert!(output.contains("Vegetables (1)"));
        assert!(output.contains("Carrot"));
    }

    #[test]
    fn test_board_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_board(&snapshot(), &BoardConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["main"].as_array().unwrap().len(), 2);
        assert_eq!(value["group_b"][0]["type"], "Vegetable");
    }

    #[test]
    fn test_board_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_board(&snapshot(), &BoardConfig::default())
            .unwrap();
        assert_eq!(output, "main\tApple\nmain\tBread\ngroup-b\tCarrot");
    }

    #[test]
    fn test_items_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_items(&snapshot().main).unwrap();
        assert!(output.contains("Bakery"));
        assert!(formatter.format_items(&[]).unwrap().contains("No items"));
    }

    #[test]
    fn test_directory_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_directory(&view(), today()).unwrap();
        assert!(output.contains("Engineering - 1 users, 1 companies, 1 positions"));
        assert!(output.contains("Ada Lovelace"));
        assert!(output.contains("33"));
        assert!(output.contains("Showing: 1 users | Departments: 1"));
    }

    #[test]
    fn test_directory_empty() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_directory(&DirectoryView::default(), today())
            .unwrap();
        assert!(output.contains("No users found"));
    }

    #[test]
    fn test_directory_quiet_and_summary() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(
            formatter.format_directory(&view(), today()).unwrap(),
            "Engineering\tAda Lovelace"
        );
        assert_eq!(
            formatter.format_summaries(&view()).unwrap(),
            "Engineering\t1"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }

    #[test]
    fn test_rejection_message() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.rejection(&Rejection::Closed);
        assert_eq!(msg, "⚠ Not moved: board is closed");
    }
}
