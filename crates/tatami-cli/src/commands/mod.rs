mod dashboard;
pub use dashboard::*;
mod expenses;
pub use expenses::*;
mod init;
pub use init::*;
mod ledger;
pub use ledger::*;
mod members;
pub use members::*;
mod serve;
pub use serve::*;
