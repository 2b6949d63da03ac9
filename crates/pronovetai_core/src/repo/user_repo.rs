//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over back-office users.
//! - Soft-delete semantics: deactivation flips `is_active`, rows stay.
//!
//! # Invariants
//! - `deactivate_user`/`reactivate_user` are idempotent.
//! - Active-only listing is the default visibility.

use crate::coerce::temporal::TemporalPolicy;
use crate::config::CoreConfig;
use crate::model::user::{User, UserRole};
use crate::repo::{bool_to_int, int_to_bool, read_timestamp, RecordId, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    first_name,
    last_name,
    role,
    is_active,
    date_joined
FROM users";

/// Repository interface for user CRUD and soft-delete operations.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<RecordId>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, id: RecordId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn list_users(&self, include_inactive: bool) -> RepoResult<Vec<User>>;
    fn deactivate_user(&self, id: RecordId) -> RepoResult<()>;
    fn reactivate_user(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
    temporal: TemporalPolicy,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection, config: &CoreConfig) -> Self {
        Self {
            conn,
            temporal: config.temporal_policy(),
        }
    }

    fn set_active(&self, id: RecordId, active: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET is_active = ?1 WHERE id = ?2;",
            params![bool_to_int(active), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        Ok(())
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO users (username, email, first_name, last_name, role, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user.username.as_str(),
                user.email.as_deref(),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
                user.role.as_db(),
                bool_to_int(user.is_active),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET username = ?1, email = ?2, first_name = ?3, last_name = ?4,
                 role = ?5, is_active = ?6
             WHERE id = ?7;",
            params![
                user.username.as_str(),
                user.email.as_deref(),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
                user.role.as_db(),
                bool_to_int(user.is_active),
                user.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "user",
                id: user.id,
            });
        }

        Ok(())
    }

    fn get_user(&self, id: RecordId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_user_row(row)?));
        }

        Ok(None)
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query(params![username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_users(&self, include_inactive: bool) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} WHERE (?1 = 1 OR is_active = 1) ORDER BY username ASC;"
        ))?;

        let mut rows = stmt.query(params![bool_to_int(include_inactive)])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(self.parse_user_row(row)?);
        }

        Ok(users)
    }

    fn deactivate_user(&self, id: RecordId) -> RepoResult<()> {
        self.set_active(id, false)
    }

    fn reactivate_user(&self, id: RecordId) -> RepoResult<()> {
        self.set_active(id, true)
    }
}

impl SqliteUserRepository<'_> {
    fn parse_user_row(&self, row: &Row<'_>) -> RepoResult<User> {
        let role_text: String = row.get("role")?;
        let role = UserRole::parse(&role_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
        })?;

        Ok(User {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            role,
            is_active: int_to_bool("users", "is_active", row.get("is_active")?)?,
            date_joined: read_timestamp(row, "date_joined", &self.temporal)?,
        })
    }
}
