use crate::domain::model::{Assignment, DrawSession, EmailMessage, Participant};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence boundary for draw sessions. `replace_assignments` swaps the
/// whole assignment set for a session (delete-then-create); the previous
/// set must stay untouched when a draw fails before reaching this call.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn session(&self, session_id: &str) -> Result<DrawSession>;
    async fn participants(&self, session_id: &str) -> Result<Vec<Participant>>;
    async fn assignments(&self, session_id: &str) -> Result<Vec<Assignment>>;
    async fn replace_assignments(
        &self,
        session_id: &str,
        assignments: Vec<Assignment>,
    ) -> Result<()>;
    async fn mark_sent(&self, session_id: &str, giver_id: &str, at: DateTime<Utc>) -> Result<()>;
}

/// Delivery boundary. Implementations decide what "send" means (record,
/// outbox file, real transport); the engine only hands over rendered
/// messages.
pub trait Mailer: Send + Sync {
    fn send(&self, message: &EmailMessage)
        -> impl std::future::Future<Output = Result<()>> + Send;
}
