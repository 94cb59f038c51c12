//! PostgreSQL implementation of FacilityReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::claim::Facility;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::FacilityReader;

/// Facilities read from the `facilities` table.
///
/// Ordered by id so the digit a subscriber picks always resolves against
/// the same list the prompt displayed.
#[derive(Clone)]
pub struct PostgresFacilityReader {
    pool: PgPool,
}

impl PostgresFacilityReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityReader for PostgresFacilityReader {
    async fn list(&self) -> Result<Vec<Facility>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM facilities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch facilities: {}", e),
                )
            })?;

        rows.into_iter()
            .map(|row| {
                let id: i64 = row.try_get("id").map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
                })?;
                let name: String = row.try_get("name").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to get name: {}", e),
                    )
                })?;
                Ok(Facility::new(id, name))
            })
            .collect()
    }
}
