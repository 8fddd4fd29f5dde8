//! SQLite veterinarian repository implementation.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use vetclinic_core::repository::veterinarian::VeterinarianRepository;
use vetclinic_types::error::RepositoryError;
use vetclinic_types::veterinarian::{Veterinarian, VeterinarianId};

use super::pool::DatabasePool;
use super::unit_of_work::{PendingWrite, PendingWrites};
use super::{format_datetime, map_read_error, parse_datetime, parse_id};

/// Veterinarian columns under the `vt` table alias.
pub(crate) const VETERINARIAN_COLUMNS: &str = "vt.id AS vt_id, vt.first_name AS vt_first_name, \
     vt.last_name AS vt_last_name, vt.email AS vt_email, vt.phone_number AS vt_phone_number, \
     vt.specialization AS vt_specialization, vt.is_active AS vt_is_active, vt.created_at AS vt_created_at";

/// SQLite-backed implementation of `VeterinarianRepository`.
pub struct SqliteVeterinarianRepository {
    pool: DatabasePool,
    pending: PendingWrites,
}

impl SqliteVeterinarianRepository {
    pub(crate) fn new(pool: DatabasePool, pending: PendingWrites) -> Self {
        Self { pool, pending }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: String,
    ) -> Result<Option<Veterinarian>, RepositoryError> {
        let sql = format!("SELECT {VETERINARIAN_COLUMNS} FROM veterinarians vt WHERE {condition}");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        match row {
            Some(row) => veterinarian_from_row(&row),
            None => Ok(None),
        }
    }

    /// Number of stored veterinarians. Used to decide whether to seed.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM veterinarians")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_read_error)?;
        Ok(count)
    }
}

struct VeterinarianRow {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    specialization: Option<String>,
    is_active: Option<bool>,
    created_at: Option<String>,
}

impl VeterinarianRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("vt_id")?,
            first_name: row.try_get("vt_first_name")?,
            last_name: row.try_get("vt_last_name")?,
            email: row.try_get("vt_email")?,
            phone_number: row.try_get("vt_phone_number")?,
            specialization: row.try_get("vt_specialization")?,
            is_active: row.try_get("vt_is_active")?,
            created_at: row.try_get("vt_created_at")?,
        })
    }

    fn into_veterinarian(self) -> Result<Option<Veterinarian>, RepositoryError> {
        let Some(id) = self.id else {
            return Ok(None);
        };

        Ok(Some(Veterinarian {
            id: parse_id::<VeterinarianId>(&id, "veterinarian")?,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number,
            specialization: self.specialization,
            is_active: self.is_active.unwrap_or(true),
            created_at: parse_datetime(self.created_at.as_deref().unwrap_or_default())?,
        }))
    }
}

/// Map the `vt_*` columns of a row; `None` when the veterinarian is absent.
pub(crate) fn veterinarian_from_row(row: &SqliteRow) -> Result<Option<Veterinarian>, RepositoryError> {
    VeterinarianRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_veterinarian()
}

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    vet: &Veterinarian,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO veterinarians (id, first_name, last_name, email, phone_number, specialization, is_active, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(vet.id.to_string())
    .bind(&vet.first_name)
    .bind(&vet.last_name)
    .bind(&vet.email)
    .bind(&vet.phone_number)
    .bind(&vet.specialization)
    .bind(vet.is_active)
    .bind(format_datetime(&vet.created_at))
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    vet: &Veterinarian,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE veterinarians
         SET first_name = ?, last_name = ?, email = ?, phone_number = ?, specialization = ?, is_active = ?
         WHERE id = ?",
    )
    .bind(&vet.first_name)
    .bind(&vet.last_name)
    .bind(&vet.email)
    .bind(&vet.phone_number)
    .bind(&vet.specialization)
    .bind(vet.is_active)
    .bind(vet.id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

impl VeterinarianRepository for SqliteVeterinarianRepository {
    async fn get_by_id(&self, id: &VeterinarianId) -> Result<Option<Veterinarian>, RepositoryError> {
        self.fetch_one_where("vt.id = ?", id.to_string()).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Veterinarian>, RepositoryError> {
        self.fetch_one_where("vt.email = ?", email.to_string()).await
    }

    async fn add(&self, veterinarian: &Veterinarian) -> Result<Veterinarian, RepositoryError> {
        self.pending
            .push(PendingWrite::InsertVeterinarian(veterinarian.clone()));
        Ok(veterinarian.clone())
    }

    async fn update(&self, veterinarian: &Veterinarian) -> Result<(), RepositoryError> {
        self.pending
            .push(PendingWrite::UpdateVeterinarian(veterinarian.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vetclinic_core::repository::UnitOfWork;

    use super::*;
    use crate::sqlite::test_support::{make_vet, test_pool};
    use crate::sqlite::unit_of_work::SqliteUnitOfWork;

    #[tokio::test]
    async fn test_add_get_and_count() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        assert_eq!(uow.veterinarians().count().await.unwrap(), 0);

        let vet = make_vet("Emily", "Johnson");
        uow.veterinarians().add(&vet).await.unwrap();
        uow.save_changes().await.unwrap();

        let found = uow.veterinarians().get_by_id(&vet.id).await.unwrap().unwrap();
        assert_eq!(found, vet);
        assert_eq!(uow.veterinarians().count().await.unwrap(), 1);

        let by_email = uow
            .veterinarians()
            .get_by_email("EMILY.JOHNSON@vetclinic.com")
            .await
            .unwrap();
        assert_eq!(by_email.map(|v| v.id), Some(vet.id));
    }

    #[tokio::test]
    async fn test_update_deactivates() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        let mut vet = make_vet("Michael", "Brown");
        uow.veterinarians().add(&vet).await.unwrap();
        uow.save_changes().await.unwrap();

        vet.is_active = false;
        uow.veterinarians().update(&vet).await.unwrap();
        uow.save_changes().await.unwrap();

        let found = uow.veterinarians().get_by_id(&vet.id).await.unwrap().unwrap();
        assert!(!found.is_active);
    }

    #[tokio::test]
    async fn test_missing_is_none() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        assert!(uow
            .veterinarians()
            .get_by_id(&VeterinarianId::new())
            .await
            .unwrap()
            .is_none());
    }
}
