//! Process-wide configuration resolved once at boot.
//!
//! # Responsibility
//! - Carry the timezone-aware mode flag, default zone, legacy zero-text
//!   policy, and the default role for newly registered users.
//! - Fail fast on unresolvable settings instead of surfacing them at
//!   first use.
//!
//! # Invariants
//! - The global config is installed at most once per process.
//! - Divergent re-initialization is rejected; identical re-init is a
//!   no-op.

use crate::coerce::numeric::ZeroPolicy;
use crate::coerce::temporal::TemporalPolicy;
use crate::model::user::UserRole;
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

static GLOBAL_CONFIG: OnceCell<CoreConfig> = OnceCell::new();

/// Fatal boot-time configuration failure.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownTimeZone(String),
    UnknownRole(String),
    AlreadyInitialized,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTimeZone(name) => write!(f, "unknown time zone `{name}`"),
            Self::UnknownRole(name) => write!(f, "unknown user role `{name}`"),
            Self::AlreadyInitialized => {
                write!(f, "core config already initialized with different settings")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved process configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// When true, temporal coercion localizes naive storage text into
    /// `default_zone`.
    pub use_tz: bool,
    pub default_zone: Tz,
    /// How the legacy stored text `"0"` reads on integer columns.
    pub zero_integer_policy: ZeroPolicy,
    /// Role assigned when registration does not specify one. Replaces the
    /// legacy implicit "User" user-type fallback.
    pub default_user_role: UserRole,
}

impl CoreConfig {
    /// Builds a config from unvalidated external settings.
    ///
    /// # Errors
    /// - `UnknownTimeZone` when `zone_name` is not an IANA zone.
    /// - `UnknownRole` when `default_role` is not a known role name.
    pub fn from_strings(
        use_tz: bool,
        zone_name: &str,
        default_role: &str,
    ) -> Result<Self, ConfigError> {
        let default_zone = zone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(zone_name.to_string()))?;
        let default_user_role = UserRole::parse(default_role)
            .ok_or_else(|| ConfigError::UnknownRole(default_role.to_string()))?;

        Ok(Self {
            use_tz,
            default_zone,
            zero_integer_policy: ZeroPolicy::NullOnZero,
            default_user_role,
        })
    }

    /// Temporal policy derived from this config.
    pub fn temporal_policy(&self) -> TemporalPolicy {
        TemporalPolicy {
            use_tz: self.use_tz,
            zone: self.default_zone,
        }
    }

    /// Temporal policy with a per-connection zone override, when the
    /// active storage connection advertises its own zone.
    pub fn temporal_policy_with_zone(&self, connection_zone: Option<Tz>) -> TemporalPolicy {
        TemporalPolicy {
            use_tz: self.use_tz,
            zone: connection_zone.unwrap_or(self.default_zone),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            use_tz: true,
            default_zone: chrono_tz::Tz::Asia__Manila,
            zero_integer_policy: ZeroPolicy::NullOnZero,
            default_user_role: UserRole::User,
        }
    }
}

/// Installs the process-wide config.
///
/// Identical repeated initialization is a no-op; divergent settings are
/// rejected.
pub fn init_config(config: CoreConfig) -> Result<(), ConfigError> {
    let installed = GLOBAL_CONFIG.get_or_init(|| config);
    if *installed != config {
        return Err(ConfigError::AlreadyInitialized);
    }
    Ok(())
}

/// Returns the installed process-wide config, or `None` before boot.
pub fn global_config() -> Option<&'static CoreConfig> {
    GLOBAL_CONFIG.get()
}
