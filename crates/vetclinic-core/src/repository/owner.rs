//! Owner repository trait definition.

use vetclinic_types::error::RepositoryError;
use vetclinic_types::owner::{Owner, OwnerId};

/// Repository trait for owner persistence. Owners are never deleted.
pub trait OwnerRepository: Send + Sync {
    fn get_by_id(
        &self,
        id: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<Owner>, RepositoryError>> + Send;

    /// Email lookup is case-insensitive.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Owner>, RepositoryError>> + Send;

    fn add(
        &self,
        owner: &Owner,
    ) -> impl std::future::Future<Output = Result<Owner, RepositoryError>> + Send;

    fn update(
        &self,
        owner: &Owner,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
