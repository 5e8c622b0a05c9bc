//! Board command implementation.

use crate::cli::BoardArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::repl;
use bucketeer_board::seed::{DefaultSeed, JsonSeed};
use bucketeer_board::{Board, BoardConfig};
use std::sync::Arc;

/// Board settings after command-line overrides.
pub fn board_config(args: &BoardArgs, config: &Config) -> Result<BoardConfig> {
    let mut board = config.board.clone();
    if let Some(delay_ms) = args.delay_ms {
        board.revert_delay_ms = delay_ms;
    }
    board.validate()?;
    Ok(board)
}

/// Open a board for the given arguments.
pub fn open_board(args: &BoardArgs, config: &Config) -> Result<Board> {
    let board_config = board_config(args, config)?;

    let board = match &args.seed {
        Some(path) => Board::open(board_config, &JsonSeed::new(path))?,
        None => Board::open(board_config, &DefaultSeed)?,
    };
    Ok(board)
}

/// Execute the board command.
pub async fn execute_board(args: BoardArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let board = Arc::new(open_board(&args, config)?);
    repl::run_board_repl(board, formatter, config.settings.history_size).await
}
