mod bootstrap;
mod cli;

use crate::bootstrap::{config, logging, session};
use crate::cli::Cli;
use anyhow::Result;
use clap::Parser;
use quill_api::AdminClient;
use quill_events::{AppEvent, EventBus};

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let cli = Cli::parse();

    let events = EventBus::new(cli.quiet);
    events.emit(AppEvent::Starting);

    let config_path = config::config_path();
    let config = config::load(&config_path, &events).await?;

    let session = session::initialize(&config, &events).await?;
    let client = AdminClient::new(&config, session, events)?;

    cli.command.run(&client).await
}
