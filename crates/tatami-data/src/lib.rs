// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;

mod payments;
pub use payments::*;

mod expenses;
pub use expenses::*;

mod activities;
pub use activities::*;

mod staff;
pub use staff::*;

mod notifications;
pub use notifications::*;

mod settings;
pub use settings::*;

mod ledger;
pub use ledger::*;
