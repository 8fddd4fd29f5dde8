//! In-memory unit of work and recording notifier for service tests.
//!
//! Writes are staged and only reach the store on `save_changes`, mirroring
//! the SQLite implementation. Every repository call is counted, and any call
//! can be made to fail by name (e.g. `"appointments.update"`).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use vetclinic_types::animal::{Animal, AnimalId, AnimalWithOwner};
use vetclinic_types::appointment::{Appointment, AppointmentDetails, AppointmentId};
use vetclinic_types::error::RepositoryError;
use vetclinic_types::owner::{Owner, OwnerId};
use vetclinic_types::veterinarian::{Veterinarian, VeterinarianId};

use crate::notification::NotificationSender;
use crate::policy::schedule::time_ranges_overlap;
use crate::repository::UnitOfWork;
use crate::repository::animal::AnimalRepository;
use crate::repository::appointment::AppointmentRepository;
use crate::repository::owner::OwnerRepository;
use crate::repository::veterinarian::VeterinarianRepository;

#[derive(Default)]
struct Store {
    owners: HashMap<OwnerId, Owner>,
    veterinarians: HashMap<VeterinarianId, Veterinarian>,
    animals: HashMap<AnimalId, Animal>,
    appointments: HashMap<AppointmentId, Appointment>,
}

impl Store {
    fn animal_with_owner(&self, id: &AnimalId) -> Option<AnimalWithOwner> {
        self.animals.get(id).map(|animal| AnimalWithOwner {
            animal: animal.clone(),
            owner: self.owners.get(&animal.owner_id).cloned(),
        })
    }

    fn details(&self, appointment: &Appointment) -> AppointmentDetails {
        AppointmentDetails {
            appointment: appointment.clone(),
            animal: self.animal_with_owner(&appointment.animal_id),
            veterinarian: self.veterinarians.get(&appointment.veterinarian_id).cloned(),
        }
    }
}

enum Staged {
    PutOwner(Owner),
    PutVeterinarian(Veterinarian),
    PutAnimal(Animal),
    DeleteAnimal(AnimalId),
    PutAppointment(Appointment),
    DeleteAppointment(AppointmentId),
}

#[derive(Default)]
struct Shared {
    store: Mutex<Store>,
    staged: Mutex<Vec<Staged>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl Shared {
    fn record(&self, op: &'static str) -> Result<(), RepositoryError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;
        if self.failing.lock().unwrap().contains(op) {
            return Err(RepositoryError::Query("database is locked".to_string()));
        }
        Ok(())
    }

    fn stage(&self, change: Staged) {
        self.staged.lock().unwrap().push(change);
    }
}

/// In-memory [`UnitOfWork`]. Cloning shares the same store.
#[derive(Clone)]
pub struct FakeUnitOfWork {
    animals: FakeAnimals,
    appointments: FakeAppointments,
    owners: FakeOwners,
    veterinarians: FakeVeterinarians,
    shared: Arc<Shared>,
}

#[derive(Clone)]
pub struct FakeAnimals(Arc<Shared>);

#[derive(Clone)]
pub struct FakeAppointments(Arc<Shared>);

#[derive(Clone)]
pub struct FakeOwners(Arc<Shared>);

#[derive(Clone)]
pub struct FakeVeterinarians(Arc<Shared>);

impl FakeUnitOfWork {
    pub fn new() -> Self {
        let shared = Arc::new(Shared::default());
        Self {
            animals: FakeAnimals(Arc::clone(&shared)),
            appointments: FakeAppointments(Arc::clone(&shared)),
            owners: FakeOwners(Arc::clone(&shared)),
            veterinarians: FakeVeterinarians(Arc::clone(&shared)),
            shared,
        }
    }

    /// Make every call to `op` fail with a query error.
    pub fn fail_on(&self, op: &'static str) {
        self.shared.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.shared.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn seed_owner(&self, owner: Owner) {
        self.shared.store.lock().unwrap().owners.insert(owner.id, owner);
    }

    pub fn seed_veterinarian(&self, vet: Veterinarian) {
        self.shared.store.lock().unwrap().veterinarians.insert(vet.id, vet);
    }

    pub fn seed_animal(&self, animal: Animal) {
        self.shared.store.lock().unwrap().animals.insert(animal.id, animal);
    }

    pub fn seed_appointment(&self, appointment: Appointment) {
        self.shared
            .store
            .lock()
            .unwrap()
            .appointments
            .insert(appointment.id, appointment);
    }

    pub fn stored_appointment(&self, id: &AppointmentId) -> Option<Appointment> {
        self.shared.store.lock().unwrap().appointments.get(id).cloned()
    }

    pub fn stored_animal(&self, id: &AnimalId) -> Option<Animal> {
        self.shared.store.lock().unwrap().animals.get(id).cloned()
    }
}

impl UnitOfWork for FakeUnitOfWork {
    type Animals = FakeAnimals;
    type Appointments = FakeAppointments;
    type Owners = FakeOwners;
    type Veterinarians = FakeVeterinarians;

    fn animals(&self) -> &FakeAnimals {
        &self.animals
    }

    fn appointments(&self) -> &FakeAppointments {
        &self.appointments
    }

    fn owners(&self) -> &FakeOwners {
        &self.owners
    }

    fn veterinarians(&self) -> &FakeVeterinarians {
        &self.veterinarians
    }

    async fn save_changes(&self) -> Result<u64, RepositoryError> {
        self.shared.record("save_changes")?;
        let staged: Vec<Staged> = self.shared.staged.lock().unwrap().drain(..).collect();
        let mut store = self.shared.store.lock().unwrap();
        let count = staged.len() as u64;
        for change in staged {
            match change {
                Staged::PutOwner(o) => {
                    store.owners.insert(o.id, o);
                }
                Staged::PutVeterinarian(v) => {
                    store.veterinarians.insert(v.id, v);
                }
                Staged::PutAnimal(a) => {
                    store.animals.insert(a.id, a);
                }
                Staged::DeleteAnimal(id) => {
                    store.animals.remove(&id);
                }
                Staged::PutAppointment(a) => {
                    store.appointments.insert(a.id, a);
                }
                Staged::DeleteAppointment(id) => {
                    store.appointments.remove(&id);
                }
            }
        }
        Ok(count)
    }
}

impl AnimalRepository for FakeAnimals {
    async fn get_by_id(&self, id: &AnimalId) -> Result<Option<AnimalWithOwner>, RepositoryError> {
        self.0.record("animals.get_by_id")?;
        Ok(self.0.store.lock().unwrap().animal_with_owner(id))
    }

    async fn add(&self, animal: &Animal) -> Result<Animal, RepositoryError> {
        self.0.record("animals.add")?;
        self.0.stage(Staged::PutAnimal(animal.clone()));
        Ok(animal.clone())
    }

    async fn update(&self, animal: &Animal) -> Result<(), RepositoryError> {
        self.0.record("animals.update")?;
        self.0.stage(Staged::PutAnimal(animal.clone()));
        Ok(())
    }

    async fn delete(&self, animal: &Animal) -> Result<(), RepositoryError> {
        self.0.record("animals.delete")?;
        self.0.stage(Staged::DeleteAnimal(animal.id));
        Ok(())
    }
}

impl AppointmentRepository for FakeAppointments {
    async fn get_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<AppointmentDetails>, RepositoryError> {
        self.0.record("appointments.get_by_id")?;
        let store = self.0.store.lock().unwrap();
        Ok(store.appointments.get(id).map(|a| store.details(a)))
    }

    async fn add(&self, appointment: &Appointment) -> Result<Appointment, RepositoryError> {
        self.0.record("appointments.add")?;
        self.0.stage(Staged::PutAppointment(appointment.clone()));
        Ok(appointment.clone())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.0.record("appointments.update")?;
        self.0.stage(Staged::PutAppointment(appointment.clone()));
        Ok(())
    }

    async fn delete(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.0.record("appointments.delete")?;
        self.0.stage(Staged::DeleteAppointment(appointment.id));
        Ok(())
    }

    async fn list_by_veterinarian_and_range(
        &self,
        veterinarian_id: &VeterinarianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetails>, RepositoryError> {
        self.0.record("appointments.list_by_veterinarian_and_range")?;
        let store = self.0.store.lock().unwrap();
        let mut matches: Vec<AppointmentDetails> = store
            .appointments
            .values()
            .filter(|a| &a.veterinarian_id == veterinarian_id)
            .filter(|a| time_ranges_overlap(a.start_time(), a.end_time(), start, end).unwrap_or(false))
            .map(|a| store.details(a))
            .collect();
        matches.sort_by_key(|d| d.appointment.start_time());
        Ok(matches)
    }
}

impl OwnerRepository for FakeOwners {
    async fn get_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, RepositoryError> {
        self.0.record("owners.get_by_id")?;
        Ok(self.0.store.lock().unwrap().owners.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Owner>, RepositoryError> {
        self.0.record("owners.get_by_email")?;
        Ok(self
            .0
            .store
            .lock()
            .unwrap()
            .owners
            .values()
            .find(|o| o.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn add(&self, owner: &Owner) -> Result<Owner, RepositoryError> {
        self.0.record("owners.add")?;
        self.0.stage(Staged::PutOwner(owner.clone()));
        Ok(owner.clone())
    }

    async fn update(&self, owner: &Owner) -> Result<(), RepositoryError> {
        self.0.record("owners.update")?;
        self.0.stage(Staged::PutOwner(owner.clone()));
        Ok(())
    }
}

impl VeterinarianRepository for FakeVeterinarians {
    async fn get_by_id(&self, id: &VeterinarianId) -> Result<Option<Veterinarian>, RepositoryError> {
        self.0.record("veterinarians.get_by_id")?;
        Ok(self.0.store.lock().unwrap().veterinarians.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Veterinarian>, RepositoryError> {
        self.0.record("veterinarians.get_by_email")?;
        Ok(self
            .0
            .store
            .lock()
            .unwrap()
            .veterinarians
            .values()
            .find(|v| v.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn add(&self, veterinarian: &Veterinarian) -> Result<Veterinarian, RepositoryError> {
        self.0.record("veterinarians.add")?;
        self.0.stage(Staged::PutVeterinarian(veterinarian.clone()));
        Ok(veterinarian.clone())
    }

    async fn update(&self, veterinarian: &Veterinarian) -> Result<(), RepositoryError> {
        self.0.record("veterinarians.update")?;
        self.0.stage(Staged::PutVeterinarian(veterinarian.clone()));
        Ok(())
    }
}

/// A cancellation notice captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotice {
    pub owner_email: String,
    pub animal_name: String,
    pub appointment_start: DateTime<Utc>,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotice>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentNotice> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSender for RecordingNotifier {
    fn send_appointment_cancellation(
        &self,
        owner_email: &str,
        animal_name: &str,
        appointment_start: DateTime<Utc>,
    ) {
        self.sent.lock().unwrap().push(SentNotice {
            owner_email: owner_email.to_string(),
            animal_name: animal_name.to_string(),
            appointment_start,
        });
    }
}
