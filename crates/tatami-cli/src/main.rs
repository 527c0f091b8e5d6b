
use anyhow::Result;

use tatami_cli::cli::{Cli, Command};
use tatami_db::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::init();

    let db = Connection::open(&cli.db).await?;
    match cli.command {
        Command::Init(cmd) => cmd.run(&db).await,
        Command::Serve(cmd) => cmd.run(&db).await,
        Command::Members(cmd) => cmd.run(&db).await,
        Command::Ledger(cmd) => cmd.run(&db).await,
        Command::Expenses(cmd) => cmd.run(&db).await,
        Command::Dashboard(cmd) => cmd.run(&db).await,
    }?;

    Ok(())
}
