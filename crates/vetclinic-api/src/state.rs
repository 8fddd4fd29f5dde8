//! Application state shared by CLI commands and REST handlers.
//!
//! AppState holds the database pool, configuration and notification sender.
//! Services are request-scoped: each accessor builds a service over a fresh
//! [`SqliteUnitOfWork`], so nothing is cached between requests.

use std::path::PathBuf;
use std::sync::Arc;

use vetclinic_core::notification::NotificationSender;
use vetclinic_core::service::animal::AnimalService;
use vetclinic_core::service::appointment::AppointmentService;
use vetclinic_core::service::owner::OwnerService;
use vetclinic_core::service::veterinarian::VeterinarianService;
use vetclinic_infra::config::resolve_database_url;
use vetclinic_infra::notification::LogNotificationSender;
use vetclinic_infra::sqlite::pool::DatabasePool;
use vetclinic_infra::sqlite::unit_of_work::SqliteUnitOfWork;
use vetclinic_types::config::ClinicConfig;

/// Shared notification handle.
pub type SharedNotifier = Arc<dyn NotificationSender>;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAppointmentService = AppointmentService<SqliteUnitOfWork, SharedNotifier>;
pub type ConcreteAnimalService = AnimalService<SqliteUnitOfWork>;
pub type ConcreteOwnerService = OwnerService<SqliteUnitOfWork>;
pub type ConcreteVeterinarianService = VeterinarianService<SqliteUnitOfWork>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabasePool,
    pub config: Arc<ClinicConfig>,
    pub data_dir: PathBuf,
    notifier: SharedNotifier,
}

impl AppState {
    /// Connect to the database (running migrations) and wire the notifier.
    ///
    /// `database_url` overrides the configured URL.
    pub async fn init(
        data_dir: PathBuf,
        config: ClinicConfig,
        database_url: Option<String>,
    ) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = database_url.unwrap_or_else(|| resolve_database_url(&config, &data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self::new(
            db_pool,
            config,
            data_dir,
            Arc::new(LogNotificationSender::new()),
        ))
    }

    pub fn new(
        db_pool: DatabasePool,
        config: ClinicConfig,
        data_dir: PathBuf,
        notifier: SharedNotifier,
    ) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
            data_dir,
            notifier,
        }
    }

    fn unit_of_work(&self) -> SqliteUnitOfWork {
        SqliteUnitOfWork::new(self.db_pool.clone())
    }

    pub fn appointments(&self) -> ConcreteAppointmentService {
        AppointmentService::new(self.unit_of_work(), Arc::clone(&self.notifier))
    }

    pub fn animals(&self) -> ConcreteAnimalService {
        AnimalService::new(self.unit_of_work())
    }

    pub fn owners(&self) -> ConcreteOwnerService {
        OwnerService::new(self.unit_of_work())
    }

    pub fn veterinarians(&self) -> ConcreteVeterinarianService {
        VeterinarianService::new(self.unit_of_work())
    }
}
