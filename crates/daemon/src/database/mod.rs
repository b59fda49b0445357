mod name_queries;
mod peer_queries;
mod post_queries;

use std::ops::Deref;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Handle to the node's SQLite database
///
/// A thin newtype over a connection pool. The handle is passed explicitly to
/// whatever needs storage -- there is no ambient global connection -- so
/// tests can substitute the in-memory providers from `common::store`.
#[derive(Clone, Debug)]
pub struct Database(SqlitePool);

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS peers (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        public_key_x TEXT NOT NULL,
        public_key_y TEXT NOT NULL,
        address TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        img_hash TEXT NOT NULL DEFAULT '',
        img_name TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS localuser (
        id INTEGER PRIMARY KEY CHECK (id = 0),
        name TEXT NOT NULL DEFAULT ''
    )",
    "INSERT OR IGNORE INTO localuser (id, name) VALUES (0, '')",
];

impl Database {
    /// Connect and migrate; `None` uses an in-memory database
    pub async fn connect(sqlite_path: Option<&Path>) -> Result<Self, DatabaseSetupError> {
        let pool = match sqlite_path {
            Some(path) => {
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .max_connections(8)
                    .connect_with(options)
                    .await
                    .map_err(DatabaseSetupError::Unavailable)?
            }
            None => {
                // a single never-expiring connection keeps the in-memory
                // database alive for the lifetime of the pool
                let options = SqliteConnectOptions::new().in_memory(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
                    .map_err(DatabaseSetupError::Unavailable)?
            }
        };

        let db = Database(pool);
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), DatabaseSetupError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.0)
                .await
                .map_err(DatabaseSetupError::MigrationFailed)?;
        }
        Ok(())
    }

    /// Cheap liveness probe for the readiness endpoint
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.0).await?;
        Ok(())
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("error occurred while attempting database migration: {0}")]
    MigrationFailed(sqlx::Error),

    #[error("unable to perform initial connection and check of the database: {0}")]
    Unavailable(sqlx::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use common::store::{PeerRegistry, PostStore, ProviderError};
    use common::types::{PeerRecord, Post};
    use url::Url;
    use uuid::Uuid;

    fn record(id: Uuid, name: &str) -> PeerRecord {
        PeerRecord {
            id,
            name: name.to_string(),
            public_key_x: "0a".to_string(),
            public_key_y: "0b".to_string(),
            address: Url::parse("http://localhost:9000").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_peer_round_trip_and_duplicate() {
        let db = Database::connect(None).await.unwrap();
        let id = Uuid::new_v4();

        db.add_peer(record(id, "alice")).await.unwrap();
        db.add_peer(record(Uuid::new_v4(), "bob")).await.unwrap();

        let peers = db.list_peers().await.unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].name, "alice");
        assert_eq!(peers[0].id, id);

        let err = db.add_peer(record(id, "alice-again")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Duplicate(dup) if dup == id));
    }

    #[tokio::test]
    async fn test_post_round_trip_preserves_order() {
        let db = Database::connect(None).await.unwrap();

        let first = Post::new("first", "a");
        let second = Post::new("second", "b").with_image("abcd", "cat.png");
        db.append_post(first.clone()).await.unwrap();
        db.append_post(second.clone()).await.unwrap();

        let posts = db.list_local_posts().await.unwrap();
        assert_eq!(posts, vec![first, second]);
    }

    #[tokio::test]
    async fn test_malformed_rows_decode_to_errors() {
        let db = Database::connect(None).await.unwrap();

        // a row with a broken id must surface as Err, never panic a task
        sqlx::query(
            "INSERT INTO peers (id, name, public_key_x, public_key_y, address)
             VALUES ('not-a-uuid', 'x', '0a', '0b', 'http://localhost:1')",
        )
        .execute(&*db)
        .await
        .unwrap();
        assert!(db.list_peers().await.is_err());

        sqlx::query("DELETE FROM peers").execute(&*db).await.unwrap();
        sqlx::query(&format!(
            "INSERT INTO peers (id, name, public_key_x, public_key_y, address)
             VALUES ('{}', 'x', '0a', '0b', 'not a url')",
            Uuid::new_v4()
        ))
        .execute(&*db)
        .await
        .unwrap();
        assert!(db.list_peers().await.is_err());

        sqlx::query("INSERT INTO posts (id, title, body) VALUES ('also-not-a-uuid', 't', 'b')")
            .execute(&*db)
            .await
            .unwrap();
        assert!(db.list_local_posts().await.is_err());
    }

    #[tokio::test]
    async fn test_name_round_trip() {
        let db = Database::connect(None).await.unwrap();

        assert_eq!(db.get_name().await.unwrap(), "");
        db.set_name("nest-zero").await.unwrap();
        assert_eq!(db.get_name().await.unwrap(), "nest-zero");
    }
}
