//! Owner registration service.

use chrono::Utc;

use vetclinic_types::outcome::{ServiceError, ServiceResult};
use vetclinic_types::owner::{CreateOwnerRequest, Owner, OwnerId};

use crate::repository::UnitOfWork;
use crate::repository::owner::OwnerRepository;
use crate::service::{looks_like_email, storage_failure};

pub struct OwnerService<U: UnitOfWork> {
    uow: U,
}

impl<U: UnitOfWork> OwnerService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    /// Register an owner. Emails are unique, compared case-insensitively.
    pub async fn create(&self, request: Option<CreateOwnerRequest>) -> ServiceResult<Owner> {
        let Some(request) = request else {
            return Err(ServiceError::validation("Owner request cannot be null."));
        };

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Owner name is required."));
        }
        let email = request.email.trim();
        if !looks_like_email(email) {
            return Err(ServiceError::validation("A valid email address is required."));
        }

        let owners = self.uow.owners();
        let existing = owners
            .get_by_email(email)
            .await
            .map_err(|e| storage_failure("creating owner", e))?;
        if existing.is_some() {
            return Err(ServiceError::validation("Owner email is already registered."));
        }

        let owner = Owner {
            id: OwnerId::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: non_blank(request.phone_number),
            address: non_blank(request.address),
            created_at: Utc::now(),
        };

        let created = owners
            .add(&owner)
            .await
            .map_err(|e| storage_failure("creating owner", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("creating owner", e))?;

        tracing::info!(owner_id = %created.id, "owner created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &OwnerId) -> ServiceResult<Owner> {
        self.uow
            .owners()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("retrieving owner", e))?
            .ok_or_else(|| ServiceError::not_found("Owner not found."))
    }
}

/// Trim an optional field, dropping it when only whitespace remains.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use vetclinic_types::outcome::ErrorKind;

    use crate::service::fakes::FakeUnitOfWork;

    fn request(name: &str, email: &str) -> CreateOwnerRequest {
        CreateOwnerRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone_number: Some("  ".to_string()),
            address: Some(" 12 Elm Street ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let uow = FakeUnitOfWork::new();
        let service = OwnerService::new(uow.clone());

        let owner = service
            .create(Some(request(" Bird Owner ", "birdowner@example.com")))
            .await
            .unwrap();
        assert_eq!(owner.name, "Bird Owner");
        assert!(owner.phone_number.is_none());
        assert_eq!(owner.address.as_deref(), Some("12 Elm Street"));

        let loaded = service.get_by_id(&owner.id).await.unwrap();
        assert_eq!(loaded, owner);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let uow = FakeUnitOfWork::new();
        let service = OwnerService::new(uow.clone());
        service
            .create(Some(request("Dog Owner", "dogowner@example.com")))
            .await
            .unwrap();

        let err = service
            .create(Some(request("Other", "DogOwner@Example.com")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(err.message().contains("email is already registered"));
        assert_eq!(uow.calls("owners.add"), 1);
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let service = OwnerService::new(FakeUnitOfWork::new());

        let err = service.create(None).await.unwrap_err();
        assert!(err.message().contains("cannot be null"));

        let err = service.create(Some(request(" ", "a@b.com"))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = service.create(Some(request("Ann", "not-an-email"))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[tokio::test]
    async fn test_missing_owner_is_not_found() {
        let service = OwnerService::new(FakeUnitOfWork::new());
        let err = service.get_by_id(&OwnerId::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal() {
        let uow = FakeUnitOfWork::new();
        uow.fail_on("owners.get_by_email");
        let service = OwnerService::new(uow);

        let err = service
            .create(Some(request("Dog Owner", "dogowner@example.com")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }
}
