pub mod clock;
pub mod config;
pub mod db;
pub mod delivery;
pub mod error;
pub mod hours;
pub mod order;
pub mod registry;
pub mod service;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use ticket::{Command, Ticket};

use crate::clock::Clock;
use crate::config::Config;
use crate::db::Db;
use crate::service::OrderDesk;

const BANNER: &str = "Welcome to Baedal. Type `help` to see what you can do.";
const PROMPT: &str = "> ";

pub struct App<C> {
    config: Arc<Config>,
    db_file: String,
    clock: C,
}

impl<C> App<C>
where
    C: Clock,
{
    pub fn new(config: Config, db_file: String, clock: C) -> Self {
        Self {
            config: Arc::new(config),
            db_file,
            clock,
        }
    }

    /// Reads one ticket per line from `input` until `quit` or end of input,
    /// writing each reply to `output`.
    pub async fn run<R, W>(self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Initializing the application...");
        info!("Setting up the order log at {}...", self.db_file);
        let db = Arc::new(
            Db::open(&self.db_file)
                .with_context(|| format!("Couldn't open the order log {}", self.db_file))?,
        );
        let desk = OrderDesk::new(self.config, db, self.clock);

        output.write_all(format!("{}\n", BANNER).as_bytes()).await?;
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
            let Some(line) = lines.next_line().await? else {
                info!("End of input.");
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (reply, quit) = match Ticket::from_ticket_string(line) {
                Ok(ticket) => {
                    let quit = ticket.command == Command::Quit;
                    (desk.process_ticket(ticket).await, quit)
                }
                Err(e) => {
                    info!("It was a weird ticket. Error: {}", e);
                    (format!("Invalid command: {}. Try `help`.", e), false)
                }
            };
            output.write_all(format!("{}\n", reply).as_bytes()).await?;
            if quit {
                break;
            }
        }
        output.flush().await?;
        info!("Took {} orders this session.", desk.order_count().await);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_helper {
    use crate::config::Config;

    pub(crate) fn reference_config() -> Config {
        Config::from_toml_string(include_str!("../../config/baedal.toml")).unwrap()
    }
}
