
use anyhow::Result;
use clap::Args;

use tatami_data::YearMonth;
use tatami_db::Connection;
use tatami_ledger::{dashboard_stats, datetime};

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct Dashboard {
    #[clap(short, long)]
    pub month: Option<YearMonth>,
}

impl Dashboard {
    /// Run the command and print the monthly dashboard
    pub async fn run(self, db: &Connection) -> Result<()> {
        let month = self.month.unwrap_or(datetime::this_month());

        let stats = dashboard_stats(db, month).await?;
        println!("");
        stats.print_formatted();
        println!("");

        Ok(())
    }
}
