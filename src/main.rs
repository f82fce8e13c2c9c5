use clap::{CommandFactory, Parser};
use colored::*;

use shai::cli::{Cli, Command};
use shai::commands;
use shai::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        println!("{} {:?}", "DEBUG:".yellow(), cli);
    }

    match cli.command {
        Some(Command::Config { ref action }) => commands::config::run(action),
        None => {
            if cli.query.is_empty() {
                Cli::command().print_help()?;
                return Ok(());
            }
            commands::query::run(&cli.query_text()).await
        }
    }
}
