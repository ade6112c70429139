//! Mock repositories for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use creohub_db::{
    CreateSession, DbError, DbResult, SessionRepository, SessionRow, UserRepository, UserRow,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<i64, UserRow>>,
    by_email: Arc<DashMap<String, i64>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with the given password hash, returning its id
    #[allow(dead_code)]
    pub fn insert_user(&self, email: &str, password_hash: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.by_email.insert(email.to_lowercase(), id);
        self.users.insert(
            id,
            UserRow {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                last_active_at: None,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Last recorded activity for a user
    #[allow(dead_code)]
    pub fn last_active(&self, id: i64) -> Option<DateTime<Utc>> {
        self.users.get(&id).and_then(|u| u.last_active_at)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(&email.to_lowercase())
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn touch_last_active(&self, id: i64, at: DateTime<Utc>) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_active_at = Some(at);
        }
        Ok(())
    }
}

/// In-memory session repository for testing
///
/// Keyed by token digest; `DashMap::get_mut` holds the shard lock across the
/// check and the write, matching the single-statement update in Postgres.
#[derive(Default, Clone)]
pub struct MockSessionRepository {
    sessions: Arc<DashMap<String, SessionRow>>,
    next_id: Arc<AtomicI64>,
    unavailable: Arc<AtomicBool>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down
    #[allow(dead_code)]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a session row directly for testing
    #[allow(dead_code)]
    pub fn insert_raw(&self, token_hash: &str, user_id: i64, is_active: bool, expires_at: DateTime<Utc>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        self.sessions.insert(
            token_hash.to_string(),
            SessionRow {
                id,
                user_id,
                session_token: token_hash.to_string(),
                ip_address: None,
                user_agent: None,
                is_active,
                expires_at,
                last_used_at: now,
                created_at: now,
            },
        );
    }

    /// Row stored for a token digest
    #[allow(dead_code)]
    pub fn get(&self, token_hash: &str) -> Option<SessionRow> {
        self.sessions.get(token_hash).map(|r| r.value().clone())
    }

    /// Number of stored rows
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: CreateSession) -> DbResult<SessionRow> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = SessionRow {
            id,
            user_id: session.user_id,
            session_token: session.token_hash.clone(),
            ip_address: session.ip_address,
            user_agent: session.user_agent,
            is_active: true,
            expires_at: session.expires_at,
            last_used_at: session.created_at,
            created_at: session.created_at,
        };
        self.sessions.insert(session.token_hash, row.clone());
        Ok(row)
    }

    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<SessionRow>> {
        self.check()?;
        let mut rows: Vec<SessionRow> = self
            .sessions
            .iter()
            .filter(|r| r.value().user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn extend_if_valid(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        new_expires_at: DateTime<Utc>,
    ) -> DbResult<Option<SessionRow>> {
        self.check()?;
        if let Some(mut row) = self.sessions.get_mut(token_hash) {
            if row.is_active && row.expires_at > now {
                row.expires_at = new_expires_at;
                row.last_used_at = now;
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    async fn deactivate(&self, token_hash: &str) -> DbResult<u64> {
        self.check()?;
        if let Some(mut row) = self.sessions.get_mut(token_hash) {
            if row.is_active {
                row.is_active = false;
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn deactivate_all_for_user(&self, user_id: i64) -> DbResult<u64> {
        self.check()?;
        let mut count = 0;
        for mut row in self.sessions.iter_mut() {
            if row.user_id == user_id && row.is_active {
                row.is_active = false;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
        self.check()?;
        let mut count = 0;
        for mut row in self.sessions.iter_mut() {
            if row.is_active && row.expires_at < now {
                row.is_active = false;
                count += 1;
            }
        }
        Ok(count)
    }
}
