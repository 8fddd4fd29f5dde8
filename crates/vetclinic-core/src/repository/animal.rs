//! Animal repository trait definition.

use vetclinic_types::animal::{Animal, AnimalId, AnimalWithOwner};
use vetclinic_types::error::RepositoryError;

/// Repository trait for animal persistence.
///
/// Implementations live in vetclinic-infra (e.g., SqliteAnimalRepository).
pub trait AnimalRepository: Send + Sync {
    /// Get an animal with its owner attached.
    fn get_by_id(
        &self,
        id: &AnimalId,
    ) -> impl std::future::Future<Output = Result<Option<AnimalWithOwner>, RepositoryError>> + Send;

    /// Stage a new animal. Returns the staged record.
    fn add(
        &self,
        animal: &Animal,
    ) -> impl std::future::Future<Output = Result<Animal, RepositoryError>> + Send;

    /// Stage an update of an existing animal.
    fn update(
        &self,
        animal: &Animal,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Stage a delete. Storage may refuse it on commit while appointments
    /// still reference the animal.
    fn delete(
        &self,
        animal: &Animal,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
