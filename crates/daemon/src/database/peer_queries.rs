use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use url::Url;
use uuid::Uuid;

use common::store::{PeerRegistry, ProviderError};
use common::types::PeerRecord;

use super::Database;

fn decode_peer(row: SqliteRow) -> Result<PeerRecord, sqlx::Error> {
    let id = Uuid::parse_str(&row.get::<String, _>("id")).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        }
    })?;
    let address = Url::parse(&row.get::<String, _>("address")).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "address".to_string(),
            source: Box::new(e),
        }
    })?;

    Ok(PeerRecord {
        id,
        name: row.get("name"),
        public_key_x: row.get("public_key_x"),
        public_key_y: row.get("public_key_y"),
        address,
    })
}

impl Database {
    /// All known peers in insertion order
    pub async fn get_peers(&self) -> Result<Vec<PeerRecord>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, public_key_x, public_key_y, address
             FROM peers
             ORDER BY rowid",
        )
        .fetch_all(&**self)
        .await?;

        rows.into_iter().map(decode_peer).collect()
    }

    pub async fn insert_peer(&self, record: &PeerRecord) -> Result<(), sqlx::Error> {
        let id = record.id.to_string();
        let address = record.address.to_string();
        sqlx::query(
            "INSERT INTO peers (id, name, public_key_x, public_key_y, address)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.public_key_x)
        .bind(&record.public_key_y)
        .bind(address)
        .execute(&**self)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PeerRegistry for Database {
    async fn list_peers(&self) -> Result<Vec<PeerRecord>, ProviderError> {
        self.get_peers()
            .await
            .map_err(|e| anyhow::anyhow!("failed to list peers: {}", e).into())
    }

    async fn add_peer(&self, record: PeerRecord) -> Result<(), ProviderError> {
        self.insert_peer(&record).await.map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProviderError::Duplicate(record.id)
            }
            _ => anyhow::anyhow!("failed to add peer: {}", e).into(),
        })
    }
}
