//! PostgreSQL implementation of ClaimReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::claim::{Claim, PaymentMethod, Relationship};
use crate::domain::foundation::{ClaimId, DomainError, ErrorCode, NationalId, SubscriberId, Timestamp};
use crate::ports::ClaimReader;

use super::claim_repository::str_to_claim_status;

/// Owner-scoped claim reads from the `claims` table.
#[derive(Clone)]
pub struct PostgresClaimReader {
    pool: PgPool,
}

impl PostgresClaimReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimReader for PostgresClaimReader {
    async fn find_for_owner(
        &self,
        claim_id: ClaimId,
        owner: SubscriberId,
    ) -> Result<Option<Claim>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, subscriber_id, subject_national_id, facility_id,
                   relationship, payment_method, pickup_at, amount, status
            FROM claims
            WHERE id = $1 AND subscriber_id = $2
            "#,
        )
        .bind(claim_id.as_i64())
        .bind(owner.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch claim: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_claim(row)?)),
            None => Ok(None),
        }
    }

    async fn history_for_owner(
        &self,
        owner: SubscriberId,
        limit: u32,
    ) -> Result<Vec<Claim>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, subscriber_id, subject_national_id, facility_id,
                   relationship, payment_method, pickup_at, amount, status
            FROM claims
            WHERE subscriber_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(owner.as_i64())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch claim history: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_claim).collect()
    }
}

fn row_to_claim(row: sqlx::postgres::PgRow) -> Result<Claim, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let subscriber_id: i64 = row.try_get("subscriber_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get subscriber_id: {}", e),
        )
    })?;

    let subject_national_id: String = row.try_get("subject_national_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get subject_national_id: {}", e),
        )
    })?;
    let subject_national_id = NationalId::parse(&subject_national_id).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored national_id: {}", e),
        )
    })?;

    let facility_id: i64 = row.try_get("facility_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get facility_id: {}", e),
        )
    })?;

    let relationship: String = row.try_get("relationship").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get relationship: {}", e),
        )
    })?;
    let relationship = Relationship::from_tag(&relationship).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid relationship tag: {}", relationship),
        )
    })?;

    let payment_method: String = row.try_get("payment_method").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get payment_method: {}", e),
        )
    })?;
    let payment_method = PaymentMethod::from_tag(&payment_method).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment method tag: {}", payment_method),
        )
    })?;

    let pickup_at: chrono::DateTime<chrono::Utc> = row.try_get("pickup_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get pickup_at: {}", e),
        )
    })?;

    let amount: i64 = row.try_get("amount").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get amount: {}", e),
        )
    })?;

    let status: String = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;
    let status = str_to_claim_status(&status)?;

    Ok(Claim::reconstitute(
        ClaimId::new(id),
        SubscriberId::new(subscriber_id),
        subject_national_id,
        facility_id,
        relationship,
        payment_method,
        Timestamp::from_datetime(pickup_at),
        amount,
        status,
    ))
}
