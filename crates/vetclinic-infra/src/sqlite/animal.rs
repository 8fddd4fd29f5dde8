//! SQLite animal repository implementation.
//!
//! Reads join the owner so callers get an [`AnimalWithOwner`] in one query.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use vetclinic_core::repository::animal::AnimalRepository;
use vetclinic_types::animal::{Animal, AnimalId, AnimalWithOwner};
use vetclinic_types::error::RepositoryError;
use vetclinic_types::owner::OwnerId;

use super::owner::{OWNER_COLUMNS, owner_from_row};
use super::pool::DatabasePool;
use super::unit_of_work::{PendingWrite, PendingWrites};
use super::{format_date, format_datetime, map_read_error, parse_date, parse_datetime, parse_id};

/// Animal columns under the `an` table alias.
pub(crate) const ANIMAL_COLUMNS: &str = "an.id AS an_id, an.name AS an_name, \
     an.birth_date AS an_birth_date, an.owner_id AS an_owner_id, an.created_at AS an_created_at";

/// SQLite-backed implementation of `AnimalRepository`.
pub struct SqliteAnimalRepository {
    pool: DatabasePool,
    pending: PendingWrites,
}

impl SqliteAnimalRepository {
    pub(crate) fn new(pool: DatabasePool, pending: PendingWrites) -> Self {
        Self { pool, pending }
    }
}

struct AnimalRow {
    id: Option<String>,
    name: Option<String>,
    birth_date: Option<String>,
    owner_id: Option<String>,
    created_at: Option<String>,
}

impl AnimalRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("an_id")?,
            name: row.try_get("an_name")?,
            birth_date: row.try_get("an_birth_date")?,
            owner_id: row.try_get("an_owner_id")?,
            created_at: row.try_get("an_created_at")?,
        })
    }

    fn into_animal(self) -> Result<Option<Animal>, RepositoryError> {
        let Some(id) = self.id else {
            return Ok(None);
        };

        Ok(Some(Animal {
            id: parse_id::<AnimalId>(&id, "animal")?,
            name: self.name.unwrap_or_default(),
            birth_date: parse_date(self.birth_date.as_deref().unwrap_or_default())?,
            owner_id: parse_id::<OwnerId>(self.owner_id.as_deref().unwrap_or_default(), "owner")?,
            created_at: parse_datetime(self.created_at.as_deref().unwrap_or_default())?,
        }))
    }
}

/// Map the `an_*` and `ow_*` columns of a row.
pub(crate) fn animal_with_owner_from_row(
    row: &SqliteRow,
) -> Result<Option<AnimalWithOwner>, RepositoryError> {
    let animal = AnimalRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_animal()?;

    match animal {
        Some(animal) => Ok(Some(AnimalWithOwner {
            animal,
            owner: owner_from_row(row)?,
        })),
        None => Ok(None),
    }
}

pub(crate) async fn insert(conn: &mut SqliteConnection, animal: &Animal) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO animals (id, name, birth_date, owner_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(animal.id.to_string())
    .bind(&animal.name)
    .bind(format_date(&animal.birth_date))
    .bind(animal.owner_id.to_string())
    .bind(format_datetime(&animal.created_at))
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn update(conn: &mut SqliteConnection, animal: &Animal) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE animals SET name = ?, birth_date = ?, owner_id = ? WHERE id = ?")
        .bind(&animal.name)
        .bind(format_date(&animal.birth_date))
        .bind(animal.owner_id.to_string())
        .bind(animal.id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete(conn: &mut SqliteConnection, id: &AnimalId) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM animals WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

impl AnimalRepository for SqliteAnimalRepository {
    async fn get_by_id(&self, id: &AnimalId) -> Result<Option<AnimalWithOwner>, RepositoryError> {
        let sql = format!(
            "SELECT {ANIMAL_COLUMNS}, {OWNER_COLUMNS}
             FROM animals an
             LEFT JOIN owners ow ON ow.id = an.owner_id
             WHERE an.id = ?"
        );
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        match row {
            Some(row) => animal_with_owner_from_row(&row),
            None => Ok(None),
        }
    }

    async fn add(&self, animal: &Animal) -> Result<Animal, RepositoryError> {
        self.pending.push(PendingWrite::InsertAnimal(animal.clone()));
        Ok(animal.clone())
    }

    async fn update(&self, animal: &Animal) -> Result<(), RepositoryError> {
        self.pending.push(PendingWrite::UpdateAnimal(animal.clone()));
        Ok(())
    }

    async fn delete(&self, animal: &Animal) -> Result<(), RepositoryError> {
        self.pending.push(PendingWrite::DeleteAnimal(animal.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vetclinic_core::repository::UnitOfWork;
    use vetclinic_core::repository::owner::OwnerRepository;

    use super::*;
    use crate::sqlite::test_support::{make_animal, make_owner, test_pool};
    use crate::sqlite::unit_of_work::SqliteUnitOfWork;

    #[tokio::test]
    async fn test_get_by_id_attaches_owner() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        let owner = make_owner("Dog Owner", "dogowner@example.com");
        let animal = make_animal("Dog", owner.id);
        uow.owners().add(&owner).await.unwrap();
        uow.animals().add(&animal).await.unwrap();
        assert_eq!(uow.save_changes().await.unwrap(), 2);

        let found = uow.animals().get_by_id(&animal.id).await.unwrap().unwrap();
        assert_eq!(found.animal, animal);
        assert_eq!(found.owner, Some(owner));
    }

    #[tokio::test]
    async fn test_unknown_owner_is_rejected() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        uow.animals()
            .add(&make_animal("Stray", OwnerId::new()))
            .await
            .unwrap();

        let err = uow.save_changes().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_long_name_is_stored() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        let owner = make_owner("Dog Owner", "dogowner@example.com");
        let animal = make_animal(&"R".repeat(150), owner.id);
        uow.owners().add(&owner).await.unwrap();
        uow.animals().add(&animal).await.unwrap();
        uow.save_changes().await.unwrap();

        let found = uow.animals().get_by_id(&animal.id).await.unwrap().unwrap();
        assert_eq!(found.animal.name.len(), 150);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        let owner = make_owner("Cat Owner", "catowner@example.com");
        let mut animal = make_animal("Cat", owner.id);
        uow.owners().add(&owner).await.unwrap();
        uow.animals().add(&animal).await.unwrap();
        uow.save_changes().await.unwrap();

        animal.name = "Whiskers".to_string();
        uow.animals().update(&animal).await.unwrap();
        uow.save_changes().await.unwrap();
        let found = uow.animals().get_by_id(&animal.id).await.unwrap().unwrap();
        assert_eq!(found.animal.name, "Whiskers");

        uow.animals().delete(&animal).await.unwrap();
        assert_eq!(uow.save_changes().await.unwrap(), 1);
        assert!(uow.animals().get_by_id(&animal.id).await.unwrap().is_none());
        assert!(uow.owners().get_by_id(&owner.id).await.unwrap().is_some());
    }
}
