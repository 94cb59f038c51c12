//! PostgreSQL implementation of SessionStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::SessionStore;

/// Session levels persisted in the `ussd_sessions` table.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn level(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let row = sqlx::query("SELECT level FROM ussd_sessions WHERE session_id = $1")
            .bind(session_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch session level: {}", e),
                )
            })?;

        match row {
            Some(row) => {
                let level: i32 = row.try_get("level").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to get level: {}", e),
                    )
                })?;
                Ok(level.max(0) as u32)
            }
            None => Ok(0),
        }
    }

    async fn try_advance(
        &self,
        session_id: &SessionId,
        expected: u32,
        next: u32,
    ) -> Result<bool, DomainError> {
        // Fresh sessions go through `reset` before any advance, so the
        // row exists and `expected` is at least 1. A second delivery of
        // the same turn sees zero rows affected and must not re-run the
        // turn's effect.
        let result = sqlx::query(
            r#"
            UPDATE ussd_sessions
            SET level = $2
            WHERE session_id = $1 AND level = $3
            "#,
        )
        .bind(session_id.as_str())
        .bind(next as i32)
        .bind(expected as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to advance session level: {}", e),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ussd_sessions (session_id, level)
            VALUES ($1, 1)
            ON CONFLICT (session_id)
            DO UPDATE SET level = 1
            "#,
        )
        .bind(session_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to reset session: {}", e),
            )
        })?;

        Ok(())
    }
}
