use sqlx::Row;

use super::Database;

impl Database {
    /// The node's display name, empty until set
    pub async fn get_name(&self) -> Result<String, sqlx::Error> {
        let row = sqlx::query("SELECT name FROM localuser WHERE id = 0")
            .fetch_one(&**self)
            .await?;
        Ok(row.get("name"))
    }

    pub async fn set_name(&self, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE localuser SET name = ?1 WHERE id = 0")
            .bind(name)
            .execute(&**self)
            .await?;
        Ok(())
    }
}
