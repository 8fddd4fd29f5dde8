//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (vetclinic-infra) implements. The core crate never depends on any
//! specific storage technology.
//!
//! Reads return fully-resolved value structs (an appointment with its animal,
//! owner and veterinarian attached). Writes are staged on the repository and
//! only become durable when [`UnitOfWork::save_changes`] succeeds.

pub mod animal;
pub mod appointment;
pub mod owner;
pub mod veterinarian;

use vetclinic_types::error::RepositoryError;

use self::animal::AnimalRepository;
use self::appointment::AppointmentRepository;
use self::owner::OwnerRepository;
use self::veterinarian::VeterinarianRepository;

/// A request-scoped unit of work.
///
/// Create one per request and drop it afterwards; nothing is cached across
/// units of work. Uses native async fn in traits (Rust 2024 edition, no
/// async_trait macro).
pub trait UnitOfWork: Send + Sync {
    type Animals: AnimalRepository;
    type Appointments: AppointmentRepository;
    type Owners: OwnerRepository;
    type Veterinarians: VeterinarianRepository;

    fn animals(&self) -> &Self::Animals;

    fn appointments(&self) -> &Self::Appointments;

    fn owners(&self) -> &Self::Owners;

    fn veterinarians(&self) -> &Self::Veterinarians;

    /// Apply all staged writes atomically. Returns the number of rows affected.
    fn save_changes(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
