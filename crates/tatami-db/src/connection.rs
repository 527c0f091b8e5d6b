use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;


/// A thread safe connection to the club database
#[derive(Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Open a connection to the database, creating the file
    /// if it does not exist yet.
    pub async fn open(filename: &str) -> Result<Connection> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        Ok(Connection {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the underlying sqlite handle
    pub(crate) async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Open a new test database connection.
    /// The database will be created on each open.
    pub async fn open_test() -> (TestHandle, Connection) {
        let filename = format!("/tmp/tatami_test_{}.sqlite3", rand::random::<u64>());
        let handle = TestHandle { filename: filename.clone() };

        let conn = Connection::open(&filename).await.unwrap();

        // Install the schema
        schema::install(&conn).await.unwrap();

        (handle, conn)
    }
}

pub struct TestHandle {
    filename: String
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            fs::remove_file(path).unwrap();
        }
    }
}
