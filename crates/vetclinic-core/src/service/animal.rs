//! Animal workflow service.

use chrono::Utc;

use vetclinic_types::animal::{Animal, AnimalId, AnimalWithOwner, CreateAnimalRequest};
use vetclinic_types::outcome::{ServiceError, ServiceResult};

use crate::repository::UnitOfWork;
use crate::repository::animal::AnimalRepository;
use crate::service::storage_failure;

/// Service for registering, reading and removing animals.
pub struct AnimalService<U: UnitOfWork> {
    uow: U,
}

impl<U: UnitOfWork> AnimalService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    /// Register an animal. The name is trimmed; the result is reloaded so
    /// the owner is attached.
    pub async fn create(&self, request: Option<CreateAnimalRequest>) -> ServiceResult<AnimalWithOwner> {
        let Some(request) = request else {
            return Err(ServiceError::validation("Animal request cannot be null."));
        };

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Animal name is required."));
        }
        if request.owner_id.is_nil() {
            return Err(ServiceError::validation("Owner id is required."));
        }

        let animal = Animal {
            id: AnimalId::new(),
            name: name.to_string(),
            birth_date: request.birth_date,
            owner_id: request.owner_id,
            created_at: Utc::now(),
        };

        let animals = self.uow.animals();
        let created = animals
            .add(&animal)
            .await
            .map_err(|e| storage_failure("creating animal", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("creating animal", e))?;

        tracing::info!(animal_id = %created.id, owner_id = %created.owner_id, "animal created");

        let reloaded = animals
            .get_by_id(&created.id)
            .await
            .map_err(|e| storage_failure("creating animal", e))?;
        Ok(reloaded.unwrap_or(AnimalWithOwner {
            animal: created,
            owner: None,
        }))
    }

    pub async fn get_by_id(&self, id: &AnimalId) -> ServiceResult<AnimalWithOwner> {
        self.uow
            .animals()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("retrieving animal", e))?
            .ok_or_else(|| ServiceError::not_found("Animal not found."))
    }

    /// Remove an animal.
    ///
    /// An animal that still has appointments is refused by the store's
    /// foreign key and reported as an internal error.
    pub async fn delete(&self, id: &AnimalId) -> ServiceResult {
        let animals = self.uow.animals();
        let Some(existing) = animals
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("deleting animal", e))?
        else {
            return Err(ServiceError::not_found("Animal not found."));
        };

        animals
            .delete(&existing.animal)
            .await
            .map_err(|e| storage_failure("deleting animal", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("deleting animal", e))?;

        tracing::info!(animal_id = %id, "animal deleted");
        Ok(())
    }
}
