//! SQLite owner repository implementation.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use vetclinic_core::repository::owner::OwnerRepository;
use vetclinic_types::error::RepositoryError;
use vetclinic_types::owner::{Owner, OwnerId};

use super::pool::DatabasePool;
use super::unit_of_work::{PendingWrite, PendingWrites};
use super::{format_datetime, map_read_error, parse_datetime, parse_id};

/// Owner columns under the `ow` table alias.
pub(crate) const OWNER_COLUMNS: &str = "ow.id AS ow_id, ow.name AS ow_name, ow.email AS ow_email, \
     ow.phone_number AS ow_phone_number, ow.address AS ow_address, ow.created_at AS ow_created_at";

/// SQLite-backed implementation of `OwnerRepository`.
pub struct SqliteOwnerRepository {
    pool: DatabasePool,
    pending: PendingWrites,
}

impl SqliteOwnerRepository {
    pub(crate) fn new(pool: DatabasePool, pending: PendingWrites) -> Self {
        Self { pool, pending }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: String,
    ) -> Result<Option<Owner>, RepositoryError> {
        let sql = format!("SELECT {OWNER_COLUMNS} FROM owners ow WHERE {condition}");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        match row {
            Some(row) => owner_from_row(&row),
            None => Ok(None),
        }
    }
}

/// Internal row type for mapping aliased owner columns.
struct OwnerRow {
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    address: Option<String>,
    created_at: Option<String>,
}

impl OwnerRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("ow_id")?,
            name: row.try_get("ow_name")?,
            email: row.try_get("ow_email")?,
            phone_number: row.try_get("ow_phone_number")?,
            address: row.try_get("ow_address")?,
            created_at: row.try_get("ow_created_at")?,
        })
    }

    fn into_owner(self) -> Result<Option<Owner>, RepositoryError> {
        // A LEFT JOIN with no matching owner yields all-NULL columns.
        let Some(id) = self.id else {
            return Ok(None);
        };

        Ok(Some(Owner {
            id: parse_id::<OwnerId>(&id, "owner")?,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number,
            address: self.address,
            created_at: parse_datetime(self.created_at.as_deref().unwrap_or_default())?,
        }))
    }
}

/// Map the `ow_*` columns of a row; `None` when the owner is absent.
pub(crate) fn owner_from_row(row: &SqliteRow) -> Result<Option<Owner>, RepositoryError> {
    OwnerRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_owner()
}

pub(crate) async fn insert(conn: &mut SqliteConnection, owner: &Owner) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO owners (id, name, email, phone_number, address, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(owner.id.to_string())
    .bind(&owner.name)
    .bind(&owner.email)
    .bind(&owner.phone_number)
    .bind(&owner.address)
    .bind(format_datetime(&owner.created_at))
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn update(conn: &mut SqliteConnection, owner: &Owner) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE owners SET name = ?, email = ?, phone_number = ?, address = ? WHERE id = ?",
    )
    .bind(&owner.name)
    .bind(&owner.email)
    .bind(&owner.phone_number)
    .bind(&owner.address)
    .bind(owner.id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

impl OwnerRepository for SqliteOwnerRepository {
    async fn get_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, RepositoryError> {
        self.fetch_one_where("ow.id = ?", id.to_string()).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Owner>, RepositoryError> {
        // The email column is declared COLLATE NOCASE.
        self.fetch_one_where("ow.email = ?", email.to_string()).await
    }

    async fn add(&self, owner: &Owner) -> Result<Owner, RepositoryError> {
        self.pending.push(PendingWrite::InsertOwner(owner.clone()));
        Ok(owner.clone())
    }

    async fn update(&self, owner: &Owner) -> Result<(), RepositoryError> {
        self.pending.push(PendingWrite::UpdateOwner(owner.clone()));
        Ok(())
    }
}
