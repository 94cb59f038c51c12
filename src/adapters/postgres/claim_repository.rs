//! PostgreSQL implementation of ClaimRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::claim::{ClaimStatus, NewClaim};
use crate::domain::foundation::{ClaimId, DomainError, ErrorCode, SubscriberId};
use crate::ports::ClaimRepository;

pub(crate) fn claim_status_to_str(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Scheduled => "scheduled",
        ClaimStatus::Completed => "completed",
        ClaimStatus::Cancelled => "cancelled",
    }
}

pub(crate) fn str_to_claim_status(s: &str) -> Result<ClaimStatus, DomainError> {
    match s {
        "scheduled" => Ok(ClaimStatus::Scheduled),
        "completed" => Ok(ClaimStatus::Completed),
        "cancelled" => Ok(ClaimStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid claim status: {}", s),
        )),
    }
}

/// Claim writes against the `claims` and `subjects` tables.
#[derive(Clone)]
pub struct PostgresClaimRepository {
    pool: PgPool,
}

impl PostgresClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimRepository for PostgresClaimRepository {
    async fn book(&self, new: &NewClaim) -> Result<ClaimId, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin booking transaction: {}", e),
            )
        })?;

        // The conditional flip is the race arbiter: of two concurrent
        // bookings for the same subject exactly one sees a row here.
        let flipped = sqlx::query(
            r#"
            UPDATE subjects
            SET status = 'claimed'
            WHERE national_id = $1 AND status = 'unclaimed'
            "#,
        )
        .bind(new.subject_national_id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to claim subject: {}", e),
            )
        })?;

        if flipped.rows_affected() == 0 {
            let exists: (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM subjects WHERE national_id = $1")
                    .bind(new.subject_national_id.as_str())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to check subject: {}", e),
                        )
                    })?;
            return if exists.0 == 0 {
                Err(DomainError::new(
                    ErrorCode::SubjectNotFound,
                    format!("No subject with national id {}", new.subject_national_id),
                ))
            } else {
                Err(DomainError::new(
                    ErrorCode::SubjectAlreadyClaimed,
                    format!("Subject {} is already claimed", new.subject_national_id),
                ))
            };
        }

        let row = sqlx::query(
            r#"
            INSERT INTO claims (
                subscriber_id, subject_national_id, facility_id, relationship,
                payment_method, pickup_at, amount, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(new.owner.as_i64())
        .bind(new.subject_national_id.as_str())
        .bind(new.facility_id)
        .bind(new.relationship.as_str())
        .bind(new.payment_method.as_str())
        .bind(new.pickup_at.as_datetime())
        .bind(new.amount)
        .bind(claim_status_to_str(ClaimStatus::Scheduled))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert claim: {}", e),
            )
        })?;

        let id: i64 = row.try_get("id").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit booking: {}", e),
            )
        })?;

        Ok(ClaimId::new(id))
    }

    async fn cancel(&self, claim_id: ClaimId, owner: SubscriberId) -> Result<bool, DomainError> {
        // Owner scoping in the predicate: a foreign id cancels nothing and
        // reads back exactly like a missing one.
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET status = 'cancelled'
            WHERE id = $1 AND subscriber_id = $2 AND status = 'scheduled'
            "#,
        )
        .bind(claim_id.as_i64())
        .bind(owner.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to cancel claim: {}", e),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }
}
