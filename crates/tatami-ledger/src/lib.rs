pub mod datetime;
mod error;
pub use error::LedgerError;

mod report;
pub use report::{query_ledger, FilterEcho, LedgerMeta, LedgerReport, LedgerSummary};

mod expenses;
pub use expenses::{add_expense, NewExpense};

mod notify;
pub use notify::notify;

mod payments;
pub use payments::{record_payment, NewPayment};

mod stats;
pub use stats::{dashboard_stats, DashboardStats};
