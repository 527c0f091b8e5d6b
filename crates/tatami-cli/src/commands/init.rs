
use anyhow::Result;
use clap::Args;

use tatami_db::{schema, Connection};

#[derive(Args, Debug)]
pub struct Init {}

impl Init {
    /// Install the database schema
    pub async fn run(self, db: &Connection) -> Result<()> {
        schema::install(db).await?;
        println!("Database ready.");
        Ok(())
    }
}
