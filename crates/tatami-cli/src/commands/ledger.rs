
use anyhow::Result;
use clap::Args;

use tatami_data::{EntryKindFilter, LedgerFilter, YearMonth};
use tatami_db::Connection;
use tatami_ledger::query_ledger;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct Ledger {
    /// Which side of the ledger to show: all, credit or debit
    #[clap(short, long, default_value = "all")]
    pub kind: EntryKindFilter,
    #[clap(short, long)]
    pub status: Option<String>,
    #[clap(short, long)]
    pub month: Option<YearMonth>,
    #[clap(long)]
    pub search: Option<String>,
}

impl Ledger {
    /// Run the command and print the ledger with totals
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = LedgerFilter{
            kind: self.kind,
            status: self.status,
            month: self.month,
            search: self.search,
        };

        let report = query_ledger(db, &filter).await?;
        report.print_formatted();

        Ok(())
    }
}
