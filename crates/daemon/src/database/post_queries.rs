use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use common::store::{PostStore, ProviderError};
use common::types::Post;

use super::Database;

fn decode_post(row: SqliteRow) -> Result<Post, sqlx::Error> {
    let id = Uuid::parse_str(&row.get::<String, _>("id")).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        }
    })?;

    Ok(Post {
        id,
        title: row.get("title"),
        body: row.get("body"),
        img_hash: row.get("img_hash"),
        img_name: row.get("img_name"),
    })
}

impl Database {
    /// Locally authored posts in insertion order
    pub async fn get_posts(&self) -> Result<Vec<Post>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, title, body, img_hash, img_name
             FROM posts
             ORDER BY rowid",
        )
        .fetch_all(&**self)
        .await?;

        rows.into_iter().map(decode_post).collect()
    }

    pub async fn insert_post(&self, post: &Post) -> Result<(), sqlx::Error> {
        let id = post.id.to_string();
        sqlx::query(
            "INSERT INTO posts (id, title, body, img_hash, img_name)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.img_hash)
        .bind(&post.img_name)
        .execute(&**self)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for Database {
    async fn list_local_posts(&self) -> Result<Vec<Post>, ProviderError> {
        self.get_posts()
            .await
            .map_err(|e| anyhow::anyhow!("failed to list posts: {}", e).into())
    }

    async fn append_post(&self, post: Post) -> Result<(), ProviderError> {
        self.insert_post(&post)
            .await
            .map_err(|e| anyhow::anyhow!("failed to append post: {}", e).into())
    }
}
