use sqlx::Row;

use crate::domain::entities::Board;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::board_lookup::BoardLookup;
use crate::infrastructure::persistence::Database;

impl Database {
    pub async fn create_board(&self, board: &Board) -> DomainResult<()> {
        sqlx::query("INSERT INTO boards (id, title) VALUES (?, ?)")
            .bind(&board.id)
            .bind(&board.title)
            .execute(&self.pool)
            .await?;

        tracing::info!("Board created: id={}, title={}", board.id, board.title);
        Ok(())
    }
}

#[async_trait::async_trait]
impl BoardLookup for Database {
    async fn get_board(&self, board_id: &str) -> DomainResult<Option<Board>> {
        let row = sqlx::query("SELECT id, title FROM boards WHERE id = ?")
            .bind(board_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Cannot get board {}: {}", board_id, e);
                DomainError::Storage(e)
            })?;

        if let Some(row) = row {
            Ok(Some(Board {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
            }))
        } else {
            Ok(None)
        }
    }
}
