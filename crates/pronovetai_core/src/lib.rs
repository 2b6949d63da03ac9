//! Core domain logic for the Pronove Tai back-office.
//! This crate is the single source of truth for business invariants.

pub mod coerce;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use coerce::numeric::{coerce_decimal, coerce_integer, ZeroPolicy};
pub use coerce::temporal::{coerce_date, coerce_timestamp, TemporalPolicy};
pub use config::{global_config, init_config, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::building::Building;
pub use model::od_form::{
    CallDirection, CallSource, CallerType, FormStatus, Intent, OdForm, Purpose,
};
pub use model::records::{Address, Company, Contact};
pub use model::unit::{MarketingStatus, Unit, VacancyStatus};
pub use model::user::{User, UserRole};
pub use model::ValidationError;
pub use repo::building_repo::{BuildingListQuery, BuildingRepository, SqliteBuildingRepository};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::od_form_repo::{OdFormListQuery, OdFormRepository, SqliteOdFormRepository};
pub use repo::unit_repo::{SqliteUnitRepository, UnitListQuery, UnitRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RecordId, RepoError, RepoResult};
pub use service::building_service::{BuildingPayload, BuildingService};
pub use service::od_form_service::{OdFormPayload, OdFormService};
pub use service::unit_service::{UnitPayload, UnitService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
