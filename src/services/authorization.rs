//! Privilege resolution.
//!
//! Two independent sources are consulted on every call: the static
//! senior-admin allowlist from configuration and the `is_admin` flag stored
//! per user. Nothing is cached, so a demotion or password rotation takes
//! effect on the very next command.

use std::collections::HashSet;
use std::sync::Arc;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Setting, User, ADMIN_PASSWORD_KEY};
use crate::utils::validation::UserReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    None,
    Admin,
    SeniorAdmin,
}

impl Privilege {
    /// Senior admins pass every admin check.
    pub fn is_admin(self) -> bool {
        self >= Privilege::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoteOutcome {
    Demoted,
    /// The target is on the senior allowlist and cannot be demoted.
    Protected,
    NotAdmin,
    UnknownUser,
}

#[derive(Clone)]
pub struct AuthorizationModel {
    db: DatabaseManager,
    senior_admins: Arc<HashSet<i64>>,
}

impl AuthorizationModel {
    pub fn new(db: DatabaseManager, senior_admins: impl IntoIterator<Item = i64>) -> Self {
        Self {
            db,
            senior_admins: Arc::new(senior_admins.into_iter().collect()),
        }
    }

    pub fn is_senior_admin(&self, identity: i64) -> bool {
        self.senior_admins.contains(&identity)
    }

    pub async fn privilege(&self, identity: i64) -> Result<Privilege, sqlx::Error> {
        if self.is_senior_admin(identity) {
            return Ok(Privilege::SeniorAdmin);
        }

        let user = User::find_by_telegram_id(&self.db.pool, identity).await?;
        if user.is_some_and(|u| u.is_admin) {
            Ok(Privilege::Admin)
        } else {
            Ok(Privilege::None)
        }
    }

    /// Stores the configured password unless one is already persisted.
    pub async fn seed_password(&self, initial: &str) -> Result<bool, sqlx::Error> {
        Setting::seed(&self.db.pool, ADMIN_PASSWORD_KEY, initial).await
    }

    /// Exact, case-sensitive comparison with the persisted password.
    pub async fn check_password(&self, candidate: &str) -> Result<bool, sqlx::Error> {
        let stored = Setting::get(&self.db.pool, ADMIN_PASSWORD_KEY).await?;
        Ok(stored.is_some_and(|password| password == candidate))
    }

    pub async fn rotate_password(&self, new_password: &str) -> Result<(), sqlx::Error> {
        Setting::set(&self.db.pool, ADMIN_PASSWORD_KEY, new_password).await
    }

    pub async fn grant_admin(&self, identity: i64) -> Result<(), sqlx::Error> {
        User::set_admin(&self.db.pool, identity, true).await?;
        Ok(())
    }

    /// Maps a user reference to a known user id, if any.
    pub async fn resolve(&self, reference: &UserReference) -> Result<Option<i64>, sqlx::Error> {
        match reference {
            UserReference::Id(id) => Ok(Some(*id)),
            UserReference::Username(handle) => Ok(User::find_by_username(&self.db.pool, handle)
                .await?
                .map(|user| user.telegram_id)),
        }
    }

    pub async fn demote(&self, target: i64) -> Result<DemoteOutcome, sqlx::Error> {
        if self.is_senior_admin(target) {
            return Ok(DemoteOutcome::Protected);
        }

        match User::find_by_telegram_id(&self.db.pool, target).await? {
            None => Ok(DemoteOutcome::UnknownUser),
            Some(user) if !user.is_admin => Ok(DemoteOutcome::NotAdmin),
            Some(_) => {
                User::set_admin(&self.db.pool, target, false).await?;
                Ok(DemoteOutcome::Demoted)
            }
        }
    }
}
