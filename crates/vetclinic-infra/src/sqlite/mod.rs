//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools. Reads go straight to the reader pool;
//! writes are queued on a [`SqliteUnitOfWork`](unit_of_work::SqliteUnitOfWork)
//! and applied together on `save_changes`.

pub mod animal;
pub mod appointment;
pub mod owner;
pub mod pool;
pub mod seed;
pub mod unit_of_work;
pub mod veterinarian;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use vetclinic_types::error::RepositoryError;

/// Timestamps are stored as fixed-width RFC 3339 text in UTC so that text
/// comparison in SQL matches chronological order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Query(format!("invalid date: {e}")))
}

/// Parse a stored id column.
pub(crate) fn parse_id<T: std::str::FromStr<Err = uuid::Error>>(
    s: &str,
    what: &str,
) -> Result<T, RepositoryError> {
    s.parse::<T>()
        .map_err(|e| RepositoryError::Query(format!("invalid {what} id: {e}")))
}

/// Map a sqlx error from a read into a `RepositoryError`.
pub(crate) fn map_read_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

/// Map a sqlx error from a write, separating uniqueness and
/// foreign-key/check failures from other query errors.
pub(crate) fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        let message = db_err.message();
        if message.contains("UNIQUE") {
            return RepositoryError::Conflict(message.to_string());
        }
        if message.contains("FOREIGN KEY") || message.contains("CHECK") {
            return RepositoryError::Constraint(message.to_string());
        }
    }
    map_read_error(e)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, TimeZone, Utc};
    use vetclinic_types::animal::{Animal, AnimalId};
    use vetclinic_types::owner::{Owner, OwnerId};
    use vetclinic_types::veterinarian::{Veterinarian, VeterinarianId};

    use super::pool::DatabasePool;

    pub async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    pub fn make_owner(name: &str, email: &str) -> Owner {
        Owner {
            id: OwnerId::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: Some("+1234567893".to_string()),
            address: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    pub fn make_vet(first: &str, last: &str) -> Veterinarian {
        Veterinarian {
            id: VeterinarianId::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@vetclinic.com", first.to_lowercase(), last.to_lowercase()),
            phone_number: None,
            specialization: Some("Small Animals".to_string()),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    pub fn make_animal(name: &str, owner_id: OwnerId) -> Animal {
        Animal {
            id: AnimalId::new(),
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2022, 3, 4).unwrap(),
            owner_id,
            created_at: Utc.with_ymd_and_hms(2025, 1, 11, 8, 30, 0).unwrap(),
        }
    }
}
