//! Request-scoped SQLite unit of work.
//!
//! Repositories share a queue of pending writes. Nothing touches the
//! database until [`SqliteUnitOfWork::save_changes`], which applies the
//! whole queue inside one writer transaction.

use std::sync::{Arc, Mutex, MutexGuard};

use sqlx::sqlite::SqliteConnection;

use vetclinic_core::repository::UnitOfWork;
use vetclinic_types::animal::{Animal, AnimalId};
use vetclinic_types::appointment::{Appointment, AppointmentId};
use vetclinic_types::error::RepositoryError;
use vetclinic_types::owner::Owner;
use vetclinic_types::veterinarian::Veterinarian;

use super::animal::{self, SqliteAnimalRepository};
use super::appointment::{self, SqliteAppointmentRepository};
use super::owner::{self, SqliteOwnerRepository};
use super::pool::DatabasePool;
use super::veterinarian::{self, SqliteVeterinarianRepository};
use super::map_write_error;

/// A write staged by a repository, applied on `save_changes`.
#[derive(Debug, Clone)]
pub(crate) enum PendingWrite {
    InsertOwner(Owner),
    UpdateOwner(Owner),
    InsertVeterinarian(Veterinarian),
    UpdateVeterinarian(Veterinarian),
    InsertAnimal(Animal),
    UpdateAnimal(Animal),
    DeleteAnimal(AnimalId),
    InsertAppointment(Appointment),
    UpdateAppointment(Appointment),
    DeleteAppointment(AppointmentId),
}

impl PendingWrite {
    async fn apply(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        match self {
            PendingWrite::InsertOwner(o) => owner::insert(conn, o).await,
            PendingWrite::UpdateOwner(o) => owner::update(conn, o).await,
            PendingWrite::InsertVeterinarian(v) => veterinarian::insert(conn, v).await,
            PendingWrite::UpdateVeterinarian(v) => veterinarian::update(conn, v).await,
            PendingWrite::InsertAnimal(a) => animal::insert(conn, a).await,
            PendingWrite::UpdateAnimal(a) => animal::update(conn, a).await,
            PendingWrite::DeleteAnimal(id) => animal::delete(conn, id).await,
            PendingWrite::InsertAppointment(a) => appointment::insert(conn, a).await,
            PendingWrite::UpdateAppointment(a) => appointment::update(conn, a).await,
            PendingWrite::DeleteAppointment(id) => appointment::delete(conn, id).await,
        }
    }
}

/// Shared queue of pending writes.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingWrites(Arc<Mutex<Vec<PendingWrite>>>);

impl PendingWrites {
    fn lock(&self) -> MutexGuard<'_, Vec<PendingWrite>> {
        // The queue holds plain data; a poisoned lock is still usable.
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn push(&self, write: PendingWrite) {
        self.lock().push(write);
    }

    fn take(&self) -> Vec<PendingWrite> {
        std::mem::take(&mut *self.lock())
    }
}

/// SQLite-backed [`UnitOfWork`]. Create one per request.
pub struct SqliteUnitOfWork {
    pool: DatabasePool,
    pending: PendingWrites,
    animals: SqliteAnimalRepository,
    appointments: SqliteAppointmentRepository,
    owners: SqliteOwnerRepository,
    veterinarians: SqliteVeterinarianRepository,
}

impl SqliteUnitOfWork {
    pub fn new(pool: DatabasePool) -> Self {
        let pending = PendingWrites::default();
        Self {
            animals: SqliteAnimalRepository::new(pool.clone(), pending.clone()),
            appointments: SqliteAppointmentRepository::new(pool.clone(), pending.clone()),
            owners: SqliteOwnerRepository::new(pool.clone(), pending.clone()),
            veterinarians: SqliteVeterinarianRepository::new(pool.clone(), pending.clone()),
            pool,
            pending,
        }
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    type Animals = SqliteAnimalRepository;
    type Appointments = SqliteAppointmentRepository;
    type Owners = SqliteOwnerRepository;
    type Veterinarians = SqliteVeterinarianRepository;

    fn animals(&self) -> &SqliteAnimalRepository {
        &self.animals
    }

    fn appointments(&self) -> &SqliteAppointmentRepository {
        &self.appointments
    }

    fn owners(&self) -> &SqliteOwnerRepository {
        &self.owners
    }

    fn veterinarians(&self) -> &SqliteVeterinarianRepository {
        &self.veterinarians
    }

    /// Apply every pending write in order inside one transaction.
    ///
    /// On failure the transaction rolls back and the queue is discarded.
    async fn save_changes(&self) -> Result<u64, RepositoryError> {
        let writes = self.pending.take();
        if writes.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(map_write_error)?;

        let mut affected = 0;
        for write in &writes {
            affected += write.apply(&mut *tx).await.map_err(map_write_error)?;
        }

        tx.commit().await.map_err(map_write_error)?;

        tracing::debug!(writes = writes.len(), rows = affected, "unit of work committed");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use vetclinic_core::repository::animal::AnimalRepository;
    use vetclinic_core::repository::owner::OwnerRepository;
    use vetclinic_types::owner::OwnerId;

    use super::*;
    use crate::sqlite::test_support::{make_animal, make_owner, test_pool};

    #[tokio::test]
    async fn test_save_without_changes_is_zero() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        assert_eq!(uow.save_changes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_everything() {
        let uow = SqliteUnitOfWork::new(test_pool().await);
        let owner = make_owner("Dog Owner", "dogowner@example.com");
        uow.owners().add(&owner).await.unwrap();
        uow.animals()
            .add(&make_animal("Orphan", OwnerId::new()))
            .await
            .unwrap();

        assert!(uow.save_changes().await.is_err());
        assert!(uow.owners().get_by_id(&owner.id).await.unwrap().is_none());

        // The failed batch is not retried.
        assert_eq!(uow.save_changes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_units_of_work_share_the_database() {
        let pool = test_pool().await;
        let first = SqliteUnitOfWork::new(pool.clone());
        let owner = make_owner("Cat Owner", "catowner@example.com");
        first.owners().add(&owner).await.unwrap();
        first.save_changes().await.unwrap();

        let second = SqliteUnitOfWork::new(pool);
        assert!(second.owners().get_by_id(&owner.id).await.unwrap().is_some());
    }
}
