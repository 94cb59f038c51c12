//! PostgreSQL implementation of SubscriberRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Msisdn, NationalId, SubscriberId, Timestamp};
use crate::domain::subscriber::{Language, NewSubscriber, Subscriber};
use crate::ports::SubscriberRepository;

/// Subscribers persisted in the `subscribers` table, keyed by the
/// last-nine-digit phone key.
#[derive(Clone)]
pub struct PostgresSubscriberRepository {
    pool: PgPool,
}

impl PostgresSubscriberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for PostgresSubscriberRepository {
    async fn find_by_msisdn(&self, msisdn: &Msisdn) -> Result<Option<Subscriber>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, msisdn, full_name, email, national_id, city, language, registered_at
            FROM subscribers
            WHERE msisdn_key = $1
            "#,
        )
        .bind(msisdn.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch subscriber: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_subscriber(row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, new: &NewSubscriber) -> Result<Subscriber, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO subscribers (
                msisdn, msisdn_key, full_name, email, national_id, city,
                language, temporary_pin, registered_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, registered_at
            "#,
        )
        .bind(new.msisdn().as_str())
        .bind(new.msisdn().key())
        .bind(new.full_name())
        .bind(new.email())
        .bind(new.national_id().as_str())
        .bind(new.city())
        .bind(new.language().as_str())
        .bind(new.temporary_pin().as_str())
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::DuplicateRegistration,
                    format!("Phone already registered: {}", new.msisdn().key()),
                )
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert subscriber: {}", e),
                )
            }
        })?;

        let id: i64 = row.try_get("id").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
        })?;
        let registered_at: chrono::DateTime<chrono::Utc> =
            row.try_get("registered_at").map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to get registered_at: {}", e),
                )
            })?;

        Ok(Subscriber::reconstitute(
            SubscriberId::new(id),
            new.msisdn().clone(),
            new.full_name().to_string(),
            new.email().to_string(),
            new.national_id().clone(),
            new.city().to_string(),
            new.language(),
            Timestamp::from_datetime(registered_at),
        ))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

fn row_to_subscriber(row: sqlx::postgres::PgRow) -> Result<Subscriber, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let msisdn: String = row.try_get("msisdn").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get msisdn: {}", e),
        )
    })?;
    let msisdn = Msisdn::new(msisdn).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored msisdn: {}", e),
        )
    })?;

    let full_name: String = row.try_get("full_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get full_name: {}", e),
        )
    })?;

    let email: String = row.try_get("email").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get email: {}", e),
        )
    })?;

    let national_id: String = row.try_get("national_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get national_id: {}", e),
        )
    })?;
    let national_id = NationalId::parse(&national_id).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored national_id: {}", e),
        )
    })?;

    let city: String = row.try_get("city").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get city: {}", e),
        )
    })?;

    let language: String = row.try_get("language").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get language: {}", e),
        )
    })?;
    let language = Language::from_tag(&language).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid language tag: {}", language),
        )
    })?;

    let registered_at: chrono::DateTime<chrono::Utc> =
        row.try_get("registered_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get registered_at: {}", e),
            )
        })?;

    Ok(Subscriber::reconstitute(
        SubscriberId::new(id),
        msisdn,
        full_name,
        email,
        national_id,
        city,
        language,
        Timestamp::from_datetime(registered_at),
    ))
}
