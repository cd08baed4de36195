//! Billing/access collaborator — the credit and membership store.
//!
//! Checkout, webhooks, and plan activation live outside this service; the
//! pipeline only reads access state and debits credits. The `AccessStore`
//! trait keeps that boundary swappable: Postgres in production, in-memory
//! for tests and credential-free local runs.

pub mod plans;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::billing::plans::MembershipPlan;
use crate::errors::AppError;

/// One user's billing state: remaining credits plus any membership.
#[derive(Debug, Clone)]
pub struct UserAccess {
    pub email: String,
    pub credits: i64,
    pub membership_plan: Option<MembershipPlan>,
    pub membership_expires_at: Option<DateTime<Utc>>,
}

/// Whether the user currently holds an active membership.
///
/// Lifetime plans are always active; timed plans are active while their
/// expiry lies in the future; a missing expiry on a timed plan is inactive.
pub fn has_active_membership(access: Option<&UserAccess>) -> bool {
    let Some(access) = access else {
        return false;
    };
    let Some(plan) = access.membership_plan else {
        return false;
    };
    if plan.is_lifetime() {
        return true;
    }
    match access.membership_expires_at {
        Some(expires_at) => expires_at > Utc::now(),
        None => false,
    }
}

/// The access-store boundary consumed by the orchestrator.
///
/// Carried in `AppState` as `Arc<dyn AccessStore>`.
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn get_user_access(&self, email: &str) -> Result<Option<UserAccess>, AppError>;

    /// Debits one credit. Called exactly once per successful analysis,
    /// strictly after validation passes; members are never debited.
    async fn decrement_credit(&self, email: &str) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct UserAccessRow {
    email: String,
    credits: i64,
    membership_plan: Option<String>,
    membership_expires_at: Option<DateTime<Utc>>,
}

impl From<UserAccessRow> for UserAccess {
    fn from(row: UserAccessRow) -> Self {
        UserAccess {
            email: row.email,
            credits: row.credits,
            // unknown plan keys degrade to "no membership"
            membership_plan: row.membership_plan.as_deref().and_then(MembershipPlan::parse),
            membership_expires_at: row.membership_expires_at,
        }
    }
}

/// Production store backed by the `user_credits` table.
pub struct PgAccessStore {
    pool: PgPool,
}

impl PgAccessStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl AccessStore for PgAccessStore {
    async fn get_user_access(&self, email: &str) -> Result<Option<UserAccess>, AppError> {
        let row = sqlx::query_as::<_, UserAccessRow>(
            "SELECT email, credits, membership_plan, membership_expires_at \
             FROM user_credits WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserAccess::from))
    }

    async fn decrement_credit(&self, email: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE user_credits SET credits = credits - 1 WHERE email = $1 AND credits > 0")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// Map-backed store for tests and credential-free local development.
#[derive(Default)]
pub struct InMemoryAccessStore {
    users: Mutex<HashMap<String, UserAccess>>,
}

impl InMemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, access: UserAccess) {
        self.users
            .lock()
            .expect("access store poisoned")
            .insert(access.email.clone(), access);
    }
}

#[async_trait]
impl AccessStore for InMemoryAccessStore {
    async fn get_user_access(&self, email: &str) -> Result<Option<UserAccess>, AppError> {
        Ok(self
            .users
            .lock()
            .expect("access store poisoned")
            .get(email)
            .cloned())
    }

    async fn decrement_credit(&self, email: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().expect("access store poisoned");
        if let Some(access) = users.get_mut(email) {
            if access.credits > 0 {
                access.credits -= 1;
            }
        }
        Ok(())
    }
}
