//! Demo roster for a fresh database.
//!
//! Three veterinarians, three owners with one animal each, and five
//! appointments spread over yesterday, today and tomorrow. Record ids are
//! fixed so the demo data can be referenced from scripts.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use vetclinic_core::policy::status::migrate_status;
use vetclinic_core::repository::UnitOfWork;
use vetclinic_core::repository::animal::AnimalRepository;
use vetclinic_core::repository::appointment::AppointmentRepository;
use vetclinic_core::repository::owner::OwnerRepository;
use vetclinic_core::repository::veterinarian::VeterinarianRepository;
use vetclinic_types::animal::{Animal, AnimalId};
use vetclinic_types::appointment::{Appointment, AppointmentId, AppointmentStatus};
use vetclinic_types::error::{AppointmentError, RepositoryError};
use vetclinic_types::owner::{Owner, OwnerId};
use vetclinic_types::veterinarian::{Veterinarian, VeterinarianId};

use super::pool::DatabasePool;
use super::unit_of_work::SqliteUnitOfWork;

/// What a seeding attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Veterinarians already exist; nothing was written.
    AlreadySeeded,
    /// The roster was inserted; carries the number of rows written.
    Inserted(u64),
}

/// Insert the demo roster unless any veterinarian already exists.
///
/// `today` anchors the appointment times (UTC).
pub async fn seed_if_empty(
    pool: &DatabasePool,
    today: NaiveDate,
) -> Result<SeedOutcome, RepositoryError> {
    let uow = SqliteUnitOfWork::new(pool.clone());
    if uow.veterinarians().count().await? > 0 {
        tracing::debug!("veterinarians present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let now = Utc::now();

    for vet in veterinarians(now) {
        uow.veterinarians().add(&vet).await?;
    }
    let owners = owners(now);
    for owner in &owners {
        uow.owners().add(owner).await?;
    }
    let animals = animals(&owners, today, now);
    for animal in &animals {
        uow.animals().add(animal).await?;
    }
    let appointments = appointments(&animals, today)
        .map_err(|e| RepositoryError::Constraint(e.to_string()))?;
    for appointment in appointments {
        uow.appointments().add(&appointment).await?;
    }

    let rows = uow.save_changes().await?;
    tracing::info!(rows, "seeded demo roster");
    Ok(SeedOutcome::Inserted(rows))
}

fn veterinarian_id(n: u128) -> VeterinarianId {
    VeterinarianId::from_uuid(Uuid::from_u128(0xe47ac10b_58cc_4372_a567_0e02b2c3d400 + n))
}

fn owner_id(n: u128) -> OwnerId {
    OwnerId::from_uuid(Uuid::from_u128(0xd47ac10b_58cc_4372_a567_0e02b2c3d400 + n))
}

fn animal_id(n: u128) -> AnimalId {
    AnimalId::from_uuid(Uuid::from_u128(0xf47ac10b_58cc_4372_a567_0e02b2c3d400 + n))
}

fn appointment_id(n: u128) -> AppointmentId {
    AppointmentId::from_uuid(Uuid::from_u128(0xa47ac10b_58cc_4372_a567_0e02b2c3d400 + n))
}

/// `date` at `hour:minute` UTC.
fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

fn veterinarians(now: DateTime<Utc>) -> Vec<Veterinarian> {
    [
        (0x79, "John", "Smith", "+1234567890", "Small Animals"),
        (0x78, "Emily", "Johnson", "+1234567891", "Surgery"),
        (0x77, "Michael", "Brown", "+1234567892", "Exotic Animals"),
    ]
    .into_iter()
    .map(|(n, first, last, phone, specialization)| Veterinarian {
        id: veterinarian_id(n),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@vetclinic.com", first.to_lowercase(), last.to_lowercase()),
        phone_number: Some(phone.to_string()),
        specialization: Some(specialization.to_string()),
        is_active: true,
        created_at: now,
    })
    .collect()
}

fn owners(now: DateTime<Utc>) -> Vec<Owner> {
    [
        (0x79, "Dog Owner", "dogowner@example.com", "+1234567893", "123 Main St, City, State 12345"),
        (0x78, "Cat Owner", "catowner@example.com", "+1234567894", "456 Oak Ave, City, State 12345"),
        (0x77, "Rabbit Owner", "rabbitsowner@example.com", "+1234567895", "789 Pine Rd, City, State 12345"),
    ]
    .into_iter()
    .map(|(n, name, email, phone, address)| Owner {
        id: owner_id(n),
        name: name.to_string(),
        email: email.to_string(),
        phone_number: Some(phone.to_string()),
        address: Some(address.to_string()),
        created_at: now,
    })
    .collect()
}

fn animals(owners: &[Owner], today: NaiveDate, now: DateTime<Utc>) -> Vec<Animal> {
    [(0x79, "Dog", 3), (0x77, "Cat", 2), (0x76, "Rabbit", 1)]
        .into_iter()
        .zip(owners)
        .map(|((n, name, age_years), owner)| Animal {
            id: animal_id(n),
            name: name.to_string(),
            birth_date: today
                .checked_sub_months(Months::new(12 * age_years))
                .unwrap_or(today),
            owner_id: owner.id,
            created_at: now,
        })
        .collect()
}

fn appointments(animals: &[Animal], today: NaiveDate) -> Result<Vec<Appointment>, AppointmentError> {
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);
    let (dog, cat, rabbit) = (animals[0].id, animals[1].id, animals[2].id);
    let (smith, johnson, brown) = (veterinarian_id(0x79), veterinarian_id(0x78), veterinarian_id(0x77));

    let rows = [
        (0x71, at(today, 9, 0), at(today, 10, 0), dog, smith, AppointmentStatus::Scheduled, "Annual checkup"),
        (0x72, at(today, 10, 0), at(today, 10, 30), cat, smith, AppointmentStatus::Scheduled, "Follow-up visit"),
        (0x73, at(today, 11, 0), at(today, 12, 0), rabbit, johnson, AppointmentStatus::InProgress, "Dental examination"),
        (0x74, at(yesterday, 14, 0), at(yesterday, 15, 0), dog, brown, AppointmentStatus::Completed, "Completed successfully"),
        (0x75, at(tomorrow, 9, 0), at(tomorrow, 9, 45), cat, smith, AppointmentStatus::Scheduled, "Vaccination due"),
    ];

    rows.into_iter()
        .map(|(n, start_time, end_time, animal_id, veterinarian_id, status, notes)| {
            Ok(Appointment::new(start_time, end_time, animal_id, veterinarian_id)?
                .with_id(appointment_id(n))
                .with_status(migrate_status(status))
                .with_notes(Some(notes.to_string())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::test_pool;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[tokio::test]
    async fn test_seed_inserts_roster_once() {
        let pool = test_pool().await;

        let first = seed_if_empty(&pool, today()).await.unwrap();
        assert_eq!(first, SeedOutcome::Inserted(14));

        let second = seed_if_empty(&pool, today()).await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadySeeded);
    }

    #[tokio::test]
    async fn test_seed_migrates_legacy_status() {
        let pool = test_pool().await;
        seed_if_empty(&pool, today()).await.unwrap();

        let uow = SqliteUnitOfWork::new(pool);
        let dental = uow
            .appointments()
            .get_by_id(&appointment_id(0x73))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dental.appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(dental.animal.unwrap().animal.name, "Rabbit");
    }

    #[tokio::test]
    async fn test_seed_schedule_for_smith() {
        let pool = test_pool().await;
        seed_if_empty(&pool, today()).await.unwrap();

        let uow = SqliteUnitOfWork::new(pool);
        let list = uow
            .appointments()
            .list_by_veterinarian_and_range(
                &veterinarian_id(0x79),
                at(today(), 0, 0),
                at(today() + Duration::days(2), 0, 0),
            )
            .await
            .unwrap();
        let notes: Vec<&str> = list
            .iter()
            .filter_map(|d| d.appointment.notes.as_deref())
            .collect();
        assert_eq!(notes, vec!["Annual checkup", "Follow-up visit", "Vaccination due"]);
    }
}
