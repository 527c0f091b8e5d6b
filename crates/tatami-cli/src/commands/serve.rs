
use anyhow::Result;
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use tatami_db::Connection;

#[derive(Args, Debug)]
pub struct Serve {
    #[clap(long, env = "TATAMI_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: String,
}

impl Serve {
    /// Serve the back office API over HTTP
    pub async fn run(self, db: &Connection) -> Result<()> {
        let app = tatami_api::app(db.clone());
        let listener = TcpListener::bind(&self.listen).await?;
        info!("listening on {}", self.listen);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
