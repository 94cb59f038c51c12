//! PostgreSQL implementation of SubjectReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::claim::{Subject, SubjectStatus};
use crate::domain::foundation::{DomainError, ErrorCode, NationalId, Timestamp};
use crate::ports::SubjectReader;

/// Subjects read from the `subjects` table.
#[derive(Clone)]
pub struct PostgresSubjectReader {
    pool: PgPool,
}

impl PostgresSubjectReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectReader for PostgresSubjectReader {
    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Subject>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT national_id, full_name, facility_id, registered_on, status
            FROM subjects
            WHERE national_id = $1
            "#,
        )
        .bind(national_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch subject: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_subject(row)?)),
            None => Ok(None),
        }
    }
}

fn str_to_subject_status(s: &str) -> Result<SubjectStatus, DomainError> {
    match s {
        "unclaimed" => Ok(SubjectStatus::Unclaimed),
        "claimed" => Ok(SubjectStatus::Claimed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subject status: {}", s),
        )),
    }
}

fn row_to_subject(row: sqlx::postgres::PgRow) -> Result<Subject, DomainError> {
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

    let full_name: String = row.try_get("full_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get full_name: {}", e),
        )
    })?;

    let facility_id: i64 = row.try_get("facility_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get facility_id: {}", e),
        )
    })?;

    let registered_on: chrono::DateTime<chrono::Utc> =
        row.try_get("registered_on").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get registered_on: {}", e),
            )
        })?;

    let status: String = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;
    let status = str_to_subject_status(&status)?;

    Ok(Subject::reconstitute(
        national_id,
        full_name,
        facility_id,
        Timestamp::from_datetime(registered_on),
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_status_tags_parse() {
        assert_eq!(
            str_to_subject_status("unclaimed").unwrap(),
            SubjectStatus::Unclaimed
        );
        assert_eq!(
            str_to_subject_status("claimed").unwrap(),
            SubjectStatus::Claimed
        );
    }

    #[test]
    fn str_to_subject_status_rejects_invalid() {
        assert!(str_to_subject_status("missing").is_err());
    }
}
