
use clap::{Parser, Subcommand};

use crate::commands::{
    Dashboard,
    Expenses,
    Init,
    Ledger,
    Members,
    Serve,
};

#[derive(Parser, Debug)]
#[clap(name = "tatami", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, env = "TATAMI_DB", default_value = "tatami.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema
    #[clap(name = "init")]
    Init(Init),
    /// Serve the back office HTTP API
    #[clap(name = "serve")]
    Serve(Serve),

    /// Manage members
    #[clap(subcommand)]
    Members(Members),
    /// Show the unified ledger
    #[clap(name = "ledger")]
    Ledger(Ledger),
    /// Manage expenses
    #[clap(subcommand)]
    Expenses(Expenses),
    /// Show the monthly dashboard
    #[clap(name = "dashboard")]
    Dashboard(Dashboard),
}
