use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use thiserror::Error;
use uuid::Uuid;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Failure categories reported by the document store
///
/// Handlers never inspect the message text of these errors; they decide the
/// HTTP outcome from the variant alone.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("malformed identifier: {0}")]
    MalformedId(String),
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // card_likes relies on ON DELETE CASCADE
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn init_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
}

/// Runs a blocking store operation on tokio's blocking pool
///
/// Diesel connections are synchronous, so every store call goes through here
/// to keep request tasks from stalling a runtime worker while SQLite works.
pub async fn with_connection<T, F>(pool: &DbPool, op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        op(&mut conn)
    })
    .await?
}

/// Checks that `raw` is a store identifier and returns its canonical form
pub fn parse_id(raw: &str) -> Result<String, StoreError> {
    Uuid::parse_str(raw)
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| StoreError::MalformedId(raw.to_string()))
}

/// Generates a fresh store identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
