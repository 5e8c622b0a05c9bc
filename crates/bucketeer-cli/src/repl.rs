//! Interactive board REPL (Read-Eval-Print Loop).

use crate::error::{CliError, Result};
use crate::output::Formatter;
use bucketeer_board::Board;
use bucketeer_domain::Category;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Print the board
    Show,
    /// Activate an item (leave main, or go back)
    Click(String),
    /// Send an item back to main by hand
    Back(String),
    /// Let time pass
    Wait(u64),
    /// List pending timers
    Timers,
    /// Print metrics
    Metrics,
    /// Print help
    Help,
    /// Leave the REPL
    Exit,
}

/// Parse a REPL command line.
pub fn parse_board_command(line: &str) -> Result<BoardCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let rest = parts[1..].join(" ");
    let needs_item = |usage: &str| -> Result<String> {
        if rest.is_empty() {
            Err(CliError::InvalidInput(format!("Usage: {}", usage)))
        } else {
            Ok(rest.clone())
        }
    };

    match parts[0] {
        "exit" | "quit" | "q" => Ok(BoardCommand::Exit),
        "help" | "?" => Ok(BoardCommand::Help),
        "show" | "ls" => Ok(BoardCommand::Show),
        "click" | "c" => Ok(BoardCommand::Click(needs_item("click <name|id>")?)),
        "back" | "b" => Ok(BoardCommand::Back(needs_item("back <name|id>")?)),
        "wait" | "w" => {
            let ms = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: wait <ms>".to_string()))?
                .parse()
                .map_err(|_| CliError::InvalidInput("wait expects milliseconds".to_string()))?;
            Ok(BoardCommand::Wait(ms))
        }
        "timers" | "t" => Ok(BoardCommand::Timers),
        "metrics" | "m" => Ok(BoardCommand::Metrics),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Run the interactive board.
///
/// Closes the board on the way out.
pub async fn run_board_repl(
    board: Arc<Board>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Bucketeer board - Type 'help' for commands, 'exit' to quit")
    );
    println!("{}", formatter.format_board(&board.snapshot(), &board.config())?);

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let reporter = spawn_reversion_reporter(Arc::clone(&board), formatter.clone());

    loop {
        match editor.readline("bucketeer> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_board_command(line) {
                    Ok(BoardCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_board_command(cmd, &board, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    let cancelled = board.close();
    reporter.abort();
    if cancelled > 0 {
        println!(
            "{}",
            formatter.info(&format!("Cancelled {} pending timer(s)", cancelled))
        );
    }

    Ok(())
}

/// Execute one REPL command against the board.
pub async fn execute_board_command(
    cmd: BoardCommand,
    board: &Board,
    formatter: &Formatter,
) -> Result<()> {
    let config = board.config();

    match cmd {
        BoardCommand::Show => {
            println!("{}", formatter.format_board(&board.snapshot(), &config)?);
        }
        BoardCommand::Click(needle) => {
            let item = find_item(board, &needle)?;
            match board.activate(item.id) {
                Ok(transition) => {
                    println!("{}", formatter.transition(&item.name, &transition, &config))
                }
                Err(rejection) => println!("{}", formatter.rejection(&rejection)),
            }
        }
        BoardCommand::Back(needle) => {
            let item = find_item(board, &needle)?;
            let current = board.category_of(item.id).unwrap_or(Category::Main);
            match board.move_to_main(item.id, current) {
                Ok(transition) => {
                    println!("{}", formatter.transition(&item.name, &transition, &config))
                }
                Err(rejection) => println!("{}", formatter.rejection(&rejection)),
            }
        }
        BoardCommand::Wait(ms) => {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        BoardCommand::Timers => {
            let snapshot = board.snapshot();
            let pending: Vec<String> = [Category::GroupA, Category::GroupB]
                .into_iter()
                .flat_map(|category| snapshot.column(category).iter())
                .filter(|item| board.is_pending(item.id))
                .map(|item| item.name.clone())
                .collect();

            if pending.is_empty() {
                println!("{}", formatter.info("No pending timers"));
            } else {
                println!(
                    "{}",
                    formatter.info(&format!(
                        "{} pending ({:?} each): {}",
                        pending.len(),
                        config.revert_delay(),
                        pending.join(", ")
                    ))
                );
            }
        }
        BoardCommand::Metrics => {
            println!("{}", board.metrics().summary());
        }
        BoardCommand::Help => print_help(formatter),
        BoardCommand::Exit => {}
    }

    Ok(())
}

fn find_item(board: &Board, needle: &str) -> Result<bucketeer_domain::Item> {
    board
        .find(needle)
        .ok_or_else(|| CliError::InvalidInput(format!("No item matches '{}'", needle)))
}

/// Print items the timers send back to main while the prompt is open.
fn spawn_reversion_reporter(board: Arc<Board>, formatter: Formatter) -> JoinHandle<()> {
    let mut updates = board.subscribe();

    tokio::spawn(async move {
        let mut previous = updates.borrow_and_update().clone();
        let mut timed_out = board.metrics().total_timed_out();

        while updates.changed().await.is_ok() {
            let current = updates.borrow_and_update().clone();
            let now = board.metrics().total_timed_out();

            if now > timed_out {
                let config = board.config();
                for item in &current.main {
                    if let Some(from) = previous.locate(item.id).filter(|c| !c.is_main()) {
                        println!(
                            "{}",
                            formatter.info(&format!(
                                "{} timed out: {} → {}",
                                item.name,
                                config.label(from),
                                config.label(Category::Main)
                            ))
                        );
                    }
                }
            }

            timed_out = now;
            previous = current;
        }
    })
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let bucketeer_dir = home.join(".bucketeer");
    std::fs::create_dir_all(&bucketeer_dir)?;
    Ok(bucketeer_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  show                 - Show the three columns");
    println!("  click <name|id>      - Move an item out of main, or back if it is out");
    println!("  back <name|id>       - Send an item back to main now");
    println!("  wait <ms>            - Let time pass");
    println!("  timers               - List items waiting to revert");
    println!("  metrics              - Show board metrics");
    println!("  help, ?              - Show this help");
    println!("  exit, quit, q        - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use bucketeer_board::BoardConfig;
    use bucketeer_domain::Item;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_board_command("show").unwrap(), BoardCommand::Show);
        assert_eq!(
            parse_board_command("click Apple").unwrap(),
            BoardCommand::Click("Apple".to_string())
        );
        assert_eq!(
            parse_board_command("back  Water melon ").unwrap(),
            BoardCommand::Back("Water melon".to_string())
        );
        assert_eq!(
            parse_board_command("wait 5000").unwrap(),
            BoardCommand::Wait(5000)
        );
        assert_eq!(parse_board_command("q").unwrap(), BoardCommand::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_board_command("").is_err());
        assert!(parse_board_command("click").is_err());
        assert!(parse_board_command("wait soon").is_err());
        assert!(parse_board_command("dance").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_commands() {
        let apple = Item::new("Apple", "Fruit");
        let board = Board::open(BoardConfig::default(), &vec![apple.clone()]).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_board_command(BoardCommand::Click("apple".into()), &board, &formatter)
            .await
            .unwrap();
        assert_eq!(board.category_of(apple.id), Some(Category::GroupA));

        execute_board_command(BoardCommand::Wait(5001), &board, &formatter)
            .await
            .unwrap();
        assert_eq!(board.category_of(apple.id), Some(Category::Main));

        // Going back from main is declined, not an error
        execute_board_command(BoardCommand::Back("apple".into()), &board, &formatter)
            .await
            .unwrap();
        assert_eq!(board.metrics().rejected, 1);

        let missing =
            execute_board_command(BoardCommand::Click("pear".into()), &board, &formatter).await;
        assert!(matches!(missing, Err(CliError::InvalidInput(_))));
    }
}
