//! Veterinarian repository trait definition.

use vetclinic_types::error::RepositoryError;
use vetclinic_types::veterinarian::{Veterinarian, VeterinarianId};

/// Repository trait for veterinarian persistence. Veterinarians are never
/// deleted.
pub trait VeterinarianRepository: Send + Sync {
    fn get_by_id(
        &self,
        id: &VeterinarianId,
    ) -> impl std::future::Future<Output = Result<Option<Veterinarian>, RepositoryError>> + Send;

    /// Email lookup is case-insensitive.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Veterinarian>, RepositoryError>> + Send;

    fn add(
        &self,
        veterinarian: &Veterinarian,
    ) -> impl std::future::Future<Output = Result<Veterinarian, RepositoryError>> + Send;

    fn update(
        &self,
        veterinarian: &Veterinarian,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
