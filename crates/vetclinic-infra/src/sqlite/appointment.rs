//! SQLite appointment repository implementation.
//!
//! Every read joins the animal, its owner and the veterinarian so the
//! service receives fully-resolved [`AppointmentDetails`].

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use vetclinic_core::repository::appointment::AppointmentRepository;
use vetclinic_types::animal::AnimalId;
use vetclinic_types::appointment::{
    Appointment, AppointmentDetails, AppointmentId, AppointmentStatus,
};
use vetclinic_types::error::RepositoryError;
use vetclinic_types::veterinarian::VeterinarianId;

use super::animal::{ANIMAL_COLUMNS, animal_with_owner_from_row};
use super::owner::OWNER_COLUMNS;
use super::pool::DatabasePool;
use super::unit_of_work::{PendingWrite, PendingWrites};
use super::veterinarian::{VETERINARIAN_COLUMNS, veterinarian_from_row};
use super::{format_datetime, map_read_error, parse_datetime, parse_id};

/// SQLite-backed implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: DatabasePool,
    pending: PendingWrites,
}

impl SqliteAppointmentRepository {
    pub(crate) fn new(pool: DatabasePool, pending: PendingWrites) -> Self {
        Self { pool, pending }
    }
}

fn details_query(condition: &str) -> String {
    format!(
        "SELECT ap.id, ap.start_time, ap.end_time, ap.status, ap.notes, ap.animal_id, ap.veterinarian_id,
                {ANIMAL_COLUMNS}, {OWNER_COLUMNS}, {VETERINARIAN_COLUMNS}
         FROM appointments ap
         LEFT JOIN animals an ON an.id = ap.animal_id
         LEFT JOIN owners ow ON ow.id = an.owner_id
         LEFT JOIN veterinarians vt ON vt.id = ap.veterinarian_id
         WHERE {condition}"
    )
}

/// Internal row type for the appointment's own columns.
struct AppointmentRow {
    id: String,
    start_time: String,
    end_time: String,
    status: String,
    notes: Option<String>,
    animal_id: String,
    veterinarian_id: String,
}

impl AppointmentRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            status: row.try_get("status")?,
            notes: row.try_get("notes")?,
            animal_id: row.try_get("animal_id")?,
            veterinarian_id: row.try_get("veterinarian_id")?,
        })
    }

    fn into_appointment(self) -> Result<Appointment, RepositoryError> {
        let status: AppointmentStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        let appointment = Appointment::new(
            parse_datetime(&self.start_time)?,
            parse_datetime(&self.end_time)?,
            parse_id::<AnimalId>(&self.animal_id, "animal")?,
            parse_id::<VeterinarianId>(&self.veterinarian_id, "veterinarian")?,
        )
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(appointment
            .with_id(parse_id::<AppointmentId>(&self.id, "appointment")?)
            .with_status(status)
            .with_notes(self.notes))
    }
}

fn details_from_row(row: &SqliteRow) -> Result<AppointmentDetails, RepositoryError> {
    let appointment = AppointmentRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_appointment()?;

    Ok(AppointmentDetails {
        appointment,
        animal: animal_with_owner_from_row(row)?,
        veterinarian: veterinarian_from_row(row)?,
    })
}

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO appointments (id, start_time, end_time, status, notes, animal_id, veterinarian_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(appointment.id.to_string())
    .bind(format_datetime(&appointment.start_time()))
    .bind(format_datetime(&appointment.end_time()))
    .bind(appointment.status.to_string())
    .bind(&appointment.notes)
    .bind(appointment.animal_id.to_string())
    .bind(appointment.veterinarian_id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE appointments
         SET start_time = ?, end_time = ?, status = ?, notes = ?, animal_id = ?, veterinarian_id = ?
         WHERE id = ?",
    )
    .bind(format_datetime(&appointment.start_time()))
    .bind(format_datetime(&appointment.end_time()))
    .bind(appointment.status.to_string())
    .bind(&appointment.notes)
    .bind(appointment.animal_id.to_string())
    .bind(appointment.veterinarian_id.to_string())
    .bind(appointment.id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete(
    conn: &mut SqliteConnection,
    id: &AppointmentId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn get_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<AppointmentDetails>, RepositoryError> {
        let sql = details_query("ap.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.as_ref().map(details_from_row).transpose()
    }

    async fn add(&self, appointment: &Appointment) -> Result<Appointment, RepositoryError> {
        self.pending
            .push(PendingWrite::InsertAppointment(appointment.clone()));
        Ok(appointment.clone())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.pending
            .push(PendingWrite::UpdateAppointment(appointment.clone()));
        Ok(())
    }

    async fn delete(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.pending
            .push(PendingWrite::DeleteAppointment(appointment.id));
        Ok(())
    }

    async fn list_by_veterinarian_and_range(
        &self,
        veterinarian_id: &VeterinarianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetails>, RepositoryError> {
        let sql = format!(
            "{} ORDER BY ap.start_time ASC",
            details_query("ap.veterinarian_id = ? AND ap.start_time < ? AND ap.end_time > ?")
        );
        let rows = sqlx::query(&sql)
            .bind(veterinarian_id.to_string())
            .bind(format_datetime(&end))
            .bind(format_datetime(&start))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        rows.iter().map(details_from_row).collect()
    }
}
