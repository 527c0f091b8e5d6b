pub mod connection;
pub use connection::{Connection, TestHandle};

pub mod results;
pub use results::QueryError;

pub mod schema;

mod members;
mod payments;
mod expenses;
mod activities;
mod staff;
mod notifications;
mod settings;
mod ledger;
