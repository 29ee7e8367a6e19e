//! Interactive shell
//!
//! Reads one command per line, runs it to completion, prints the outcome and
//! prompts again. Errors are printed, never fatal; only `exit`/`quit` or end
//! of input leave the loop.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use super::command::{Command, HELP, ParseError};
use crate::account::UserRepository;
use crate::config::TransferConfig;
use crate::db::Database;
use crate::error::LedgerError;
use crate::transfer::TransferEngine;

pub const BANNER: &str = "user_ledger CLI — type 'help' for commands";
const PROMPT: &str = "> ";

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// REPL over the record store and transfer engine
pub struct Shell {
    users: UserRepository,
    engine: TransferEngine,
}

impl Shell {
    pub fn new(users: UserRepository, engine: TransferEngine) -> Self {
        Self { users, engine }
    }

    /// Build both components on one shared pool
    pub fn from_database(db: &Database, transfer: &TransferConfig) -> Self {
        let users = UserRepository::new(db.pool().clone());
        let engine = TransferEngine::new(db.pool().clone())
            .with_lock_order(transfer.lock_order)
            .with_lock_timeout(transfer.lock_timeout());
        Self::new(users, engine)
    }

    /// Run on the process's stdin/stdout
    pub async fn run_stdio(&self) -> io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run(stdin, &mut stdout).await
    }

    /// Run until `exit`/`quit` or end of input
    pub async fn run<R, W>(&self, mut input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        write_line(output, BANNER).await?;

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                debug!("End of input");
                write_line(output, "").await?;
                return Ok(());
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    debug!(error = %e, "Discarding non UTF-8 line");
                    write_line(output, "invalid input: not valid UTF-8").await?;
                    continue;
                }
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    write_line(output, &e.to_string()).await?;
                    continue;
                }
            };

            debug!(command = %command, "Executing command");
            if self.execute(command, output).await? == Flow::Exit {
                write_line(output, "bye").await?;
                return Ok(());
            }
        }
    }

    /// Run one command and print its outcome
    pub async fn execute<W>(&self, command: Command, output: &mut W) -> io::Result<Flow>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Help => write_line(output, HELP).await?,
            Command::Exit => return Ok(Flow::Exit),
            Command::List => match self.users.list_all().await {
                Ok(users) if users.is_empty() => write_line(output, "no users").await?,
                Ok(users) => {
                    for user in users {
                        write_line(output, &user.to_string()).await?;
                    }
                }
                Err(e) => report(output, "error", &e).await?,
            },
            Command::Add {
                name,
                email,
                balance,
            } => match self.users.insert(&name, &email, balance).await {
                Ok(user) => write_line(output, &format!("user added (id {})", user.id)).await?,
                Err(e) => report(output, "insert error", &e).await?,
            },
            Command::Get { id } => match self.users.get_by_id(id).await {
                Ok(user) => write_line(output, &user.to_string()).await?,
                Err(e) => report(output, "error", &e).await?,
            },
            Command::Transfer {
                from_id,
                to_id,
                amount,
            } => match self.engine.transfer(from_id, to_id, amount).await {
                Ok(receipt) => write_line(output, &format!("transfer ok: {}", receipt)).await?,
                Err(e) => report(output, "transfer failed", &e).await?,
            },
        }
        Ok(Flow::Continue)
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await
}

async fn report<W: AsyncWrite + Unpin>(
    output: &mut W,
    prefix: &str,
    err: &LedgerError,
) -> io::Result<()> {
    warn!(code = err.code(), error = %err, "{}", prefix);
    write_line(output, &format!("{}: {}", prefix, err)).await
}
