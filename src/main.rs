use clap::Parser;
use api_key_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Lambda) {
        Command::Lambda => cli::lambda::run().await,
        Command::Serve => cli::serve::run().await,
    }
}
