//! Veterinarian registration service.

use chrono::Utc;

use vetclinic_types::outcome::{ServiceError, ServiceResult};
use vetclinic_types::veterinarian::{CreateVeterinarianRequest, Veterinarian, VeterinarianId};

use crate::repository::UnitOfWork;
use crate::repository::veterinarian::VeterinarianRepository;
use crate::service::owner::non_blank;
use crate::service::{looks_like_email, storage_failure};

pub struct VeterinarianService<U: UnitOfWork> {
    uow: U,
}

impl<U: UnitOfWork> VeterinarianService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    /// Register an active veterinarian.
    pub async fn create(
        &self,
        request: Option<CreateVeterinarianRequest>,
    ) -> ServiceResult<Veterinarian> {
        let Some(request) = request else {
            return Err(ServiceError::validation("Veterinarian request cannot be null."));
        };

        let first_name = request.first_name.trim();
        let last_name = request.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(ServiceError::validation(
                "Veterinarian first and last name are required.",
            ));
        }
        let email = request.email.trim();
        if !looks_like_email(email) {
            return Err(ServiceError::validation("A valid email address is required."));
        }

        let veterinarians = self.uow.veterinarians();
        let existing = veterinarians
            .get_by_email(email)
            .await
            .map_err(|e| storage_failure("creating veterinarian", e))?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                "Veterinarian email is already registered.",
            ));
        }

        let vet = Veterinarian {
            id: VeterinarianId::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone_number: non_blank(request.phone_number),
            specialization: non_blank(request.specialization),
            is_active: true,
            created_at: Utc::now(),
        };

        let created = veterinarians
            .add(&vet)
            .await
            .map_err(|e| storage_failure("creating veterinarian", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("creating veterinarian", e))?;

        tracing::info!(veterinarian_id = %created.id, name = %created.full_name(), "veterinarian created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &VeterinarianId) -> ServiceResult<Veterinarian> {
        self.uow
            .veterinarians()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("retrieving veterinarian", e))?
            .ok_or_else(|| ServiceError::not_found("Veterinarian not found."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use vetclinic_types::outcome::ErrorKind;

    use crate::service::fakes::FakeUnitOfWork;

    fn request(first: &str, last: &str, email: &str) -> CreateVeterinarianRequest {
        CreateVeterinarianRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone_number: None,
            specialization: Some("Dentistry".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_is_active() {
        let uow = FakeUnitOfWork::new();
        let service = VeterinarianService::new(uow.clone());

        let vet = service
            .create(Some(request("Michael", "Smith", "michael.smith@vetclinic.com")))
            .await
            .unwrap();
        assert!(vet.is_active);
        assert_eq!(vet.full_name(), "Michael Smith");
        assert_eq!(service.get_by_id(&vet.id).await.unwrap(), vet);
        assert_eq!(uow.calls("save_changes"), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let service = VeterinarianService::new(FakeUnitOfWork::new());
        service
            .create(Some(request("Michael", "Smith", "michael.smith@vetclinic.com")))
            .await
            .unwrap();

        let err = service
            .create(Some(request("Mike", "Smyth", "MICHAEL.SMITH@vetclinic.com")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(err.message().contains("email is already registered"));
    }

    #[tokio::test]
    async fn test_blank_names_are_rejected() {
        let service = VeterinarianService::new(FakeUnitOfWork::new());
        let err = service
            .create(Some(request("Sarah", "  ", "sarah@vetclinic.com")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = service.create(None).await.unwrap_err();
        assert!(err.message().contains("cannot be null"));
    }

    #[tokio::test]
    async fn test_missing_veterinarian_is_not_found() {
        let uow = FakeUnitOfWork::new();
        let service = VeterinarianService::new(uow.clone());
        let err = service.get_by_id(&VeterinarianId::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        uow.fail_on("veterinarians.get_by_id");
        let err = service.get_by_id(&VeterinarianId::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }
}
