//! Command-line shell
//!
//! Process arguments ([`args`]), line commands ([`command`]) and the
//! read-eval-print loop ([`shell`]) over the record store and transfer engine.

pub mod args;
pub mod command;
pub mod shell;

pub use args::CliArgs;
pub use command::{Command, ParseError};
pub use shell::Shell;

/// Parse process arguments, exiting with usage on error
pub fn parse_args() -> CliArgs {
    <CliArgs as clap::Parser>::parse()
}
