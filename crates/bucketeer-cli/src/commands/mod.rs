//! Command implementations.

pub mod board;
pub mod config;
pub mod directory;
pub mod seed;

pub use self::board::execute_board;
pub use self::config::execute_config;
pub use self::directory::execute_directory;
pub use self::seed::execute_seed;
