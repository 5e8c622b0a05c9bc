//! Directory command implementation.

use crate::cli::DirectoryArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use bucketeer_directory::{
    department_list, user_count, DirectoryClient, DirectoryConfig, DirectoryQuery, SortOrder,
    UserSource,
};
use chrono::{Local, NaiveDate};

/// Directory settings after command-line overrides.
pub fn directory_config(args: &DirectoryArgs, config: &Config) -> DirectoryConfig {
    let mut directory = config.directory.clone();
    if let Some(endpoint) = &args.endpoint {
        directory.endpoint = endpoint.clone();
    }
    if let Some(limit) = args.limit {
        directory.limit = limit;
    }
    directory
}

/// Query described by the arguments.
pub fn build_query(args: &DirectoryArgs) -> DirectoryQuery {
    let mut query = DirectoryQuery::new().with_order(if args.desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    });

    if let Some(search) = &args.search {
        query = query.with_search(search.trim());
    }
    if let Some(department) = &args.department {
        query = query.with_department(department);
    }
    query
}

/// Load users from `source` and render the requested view.
pub async fn render_directory<S: UserSource>(
    source: &S,
    args: &DirectoryArgs,
    formatter: &Formatter,
    today: NaiveDate,
) -> Result<String> {
    let departments = source.load_departments().await?;

    if args.departments {
        let names = department_list(&departments);
        return Ok(match formatter.format() {
            OutputFormat::Json => serde_json::to_string_pretty(&names)?,
            _ => names.join("\n"),
        });
    }

    let view = build_query(args).apply(&departments);

    if args.summary {
        return formatter.format_summaries(&view);
    }

    let mut output = formatter.format_directory(&view, today)?;
    if formatter.format() == OutputFormat::Table {
        output.push_str(&format!("\nTotal: {} users", user_count(&departments)));
    }
    Ok(output)
}

/// Execute the directory command.
pub async fn execute_directory(
    args: DirectoryArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let client = DirectoryClient::from_config(&directory_config(&args, config))?;
    let today = Local::now().date_naive();

    match render_directory(&client, &args, formatter, today).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", formatter.error("Error fetching user data"));
            eprintln!(
                "{}",
                formatter.info("Check your connection and run the command again")
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketeer_directory::StaticSource;

    fn args() -> DirectoryArgs {
        DirectoryArgs {
            search: None,
            department: None,
            desc: false,
            endpoint: None,
            limit: None,
            summary: false,
            departments: false,
        }
    }

    fn source() -> StaticSource {
        StaticSource::from_json(
            r#"{"users": [
                {"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
                 "company": {"department": "Engineering", "name": "Engines", "title": "Programmer"}},
                {"id": 2, "firstName": "Bob", "lastName": "Ross", "email": "bob@example.com",
                 "company": {"department": "Art", "name": "Canvas", "title": "Painter"}}
            ]}"#,
        )
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_overrides() {
        let mut a = args();
        a.endpoint = Some("http://localhost:8080".to_string());
        a.limit = Some(10);

        let config = directory_config(&a, &Config::default());
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.limit, 10);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_build_query() {
        let mut a = args();
        a.search = Some("  ada ".to_string());
        a.department = Some("all".to_string());
        a.desc = true;

        let query = build_query(&a);
        assert_eq!(query.search, "ada");
        assert!(query.department.is_all());
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[tokio::test]
    async fn test_render_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut a = args();
        a.desc = true;

        let output = render_directory(&source(), &a, &formatter, today())
            .await
            .unwrap();
        assert_eq!(output, "Engineering\tAda Lovelace\nArt\tBob Ross");
    }

    #[tokio::test]
    async fn test_render_departments() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut a = args();
        a.departments = true;

        let output = render_directory(&source(), &a, &formatter, today())
            .await
            .unwrap();
        assert_eq!(output, "Art\nEngineering");
    }

    #[tokio::test]
    async fn test_render_table_totals() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut a = args();
        a.search = Some("painter".to_string());

        let output = render_directory(&source(), &a, &formatter, today())
            .await
            .unwrap();
        assert!(output.contains("Showing: 1 users | Departments: 1"));
        assert!(output.contains("Total: 2 users"));
        assert!(!output.contains("Ada"));
    }
}
