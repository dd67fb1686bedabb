use crate::domain::model::{Assignment, DrawSession, ExclusionGroup, Participant};
use crate::domain::ports::SessionStore;
use crate::utils::error::{DrawError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session storage backed by a shared map. Each CLI run works on a single
/// session loaded from its TOML file; tests use it as a fake persistence
/// layer.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, DrawSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_session(&self, session: DrawSession) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.clone(), session);
    }

    pub async fn create_session(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> DrawSession {
        let session = DrawSession::new(id, name);
        self.insert_session(session.clone()).await;
        session
    }

    pub async fn add_participant(&self, session_id: &str, participant: Participant) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::get_mut(&mut sessions, session_id)?;
        session.participants.push(participant);
        Ok(())
    }

    pub async fn add_group(&self, session_id: &str, group: ExclusionGroup) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::get_mut(&mut sessions, session_id)?;
        session.groups.push(group);
        Ok(())
    }

    /// Removing a participant invalidates any stored draw, so the whole
    /// assignment set is cleared along with them.
    pub async fn remove_participant(&self, session_id: &str, participant_id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::get_mut(&mut sessions, session_id)?;

        let before = session.participants.len();
        session.participants.retain(|p| p.id != participant_id);
        if session.participants.len() == before {
            return Err(DrawError::ParticipantNotFound {
                id: participant_id.to_string(),
            });
        }
        session.assignments.clear();
        Ok(())
    }

    fn get_mut<'a>(
        sessions: &'a mut HashMap<String, DrawSession>,
        session_id: &str,
    ) -> Result<&'a mut DrawSession> {
        sessions
            .get_mut(session_id)
            .ok_or_else(|| DrawError::SessionNotFound {
                id: session_id.to_string(),
            })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session(&self, session_id: &str) -> Result<DrawSession> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| DrawError::SessionNotFound {
                id: session_id.to_string(),
            })
    }

    async fn participants(&self, session_id: &str) -> Result<Vec<Participant>> {
        Ok(self.session(session_id).await?.participants)
    }

    async fn assignments(&self, session_id: &str) -> Result<Vec<Assignment>> {
        Ok(self.session(session_id).await?.assignments)
    }

    async fn replace_assignments(
        &self,
        session_id: &str,
        assignments: Vec<Assignment>,
    ) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::get_mut(&mut sessions, session_id)?;
        // Wholesale swap: the previous draw is discarded in the same step.
        session.assignments = assignments;
        Ok(())
    }

    async fn mark_sent(&self, session_id: &str, giver_id: &str, at: DateTime<Utc>) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::get_mut(&mut sessions, session_id)?;
        let assignment = session
            .assignments
            .iter_mut()
            .find(|a| a.giver_id == giver_id)
            .ok_or_else(|| DrawError::AssignmentNotFound {
                giver_id: giver_id.to_string(),
            })?;

        assignment.email_sent_at = Some(at);
        assignment.email_send_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> Participant {
        Participant::new(
            id,
            format!("Name {}", id),
            format!("{}@example.com", id),
            Vec::<String>::new(),
        )
    }

    #[tokio::test]
    async fn test_unknown_session_is_reported() {
        let store = InMemorySessionStore::new();
        let result = store.session("missing").await;
        assert!(matches!(result, Err(DrawError::SessionNotFound { .. })));
    }

    #[tokio::test]
    async fn test_replace_assignments_swaps_the_full_set() {
        let store = InMemorySessionStore::new();
        store.create_session("s1", "Session").await;
        store.add_participant("s1", participant("a")).await.unwrap();
        store.add_participant("s1", participant("b")).await.unwrap();

        store
            .replace_assignments("s1", vec![Assignment::new("a", "b"), Assignment::new("b", "a")])
            .await
            .unwrap();
        assert_eq!(store.assignments("s1").await.unwrap().len(), 2);

        // A rerun fully replaces the earlier pairs.
        store
            .replace_assignments("s1", vec![Assignment::new("b", "a")])
            .await
            .unwrap();
        let assignments = store.assignments("s1").await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].giver_id, "b");
    }

    #[tokio::test]
    async fn test_mark_sent_updates_delivery_metadata() {
        let store = InMemorySessionStore::new();
        store.create_session("s1", "Session").await;
        store
            .replace_assignments("s1", vec![Assignment::new("a", "b")])
            .await
            .unwrap();

        let at = Utc::now();
        store.mark_sent("s1", "a", at).await.unwrap();
        store.mark_sent("s1", "a", at).await.unwrap();

        let assignments = store.assignments("s1").await.unwrap();
        assert_eq!(assignments[0].email_sent_at, Some(at));
        assert_eq!(assignments[0].email_send_count, 2);

        let missing = store.mark_sent("s1", "nobody", at).await;
        assert!(matches!(missing, Err(DrawError::AssignmentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_group_and_participant_builds_the_aggregate() {
        let store = InMemorySessionStore::new();
        store.create_session("s1", "Session").await;
        store
            .add_group(
                "s1",
                ExclusionGroup {
                    id: "family".to_string(),
                    name: "The family".to_string(),
                },
            )
            .await
            .unwrap();
        store
            .add_participant(
                "s1",
                Participant::new("a", "Alice", "a@example.com", ["family"]),
            )
            .await
            .unwrap();

        let session = store.session("s1").await.unwrap();
        assert_eq!(session.groups.len(), 1);
        assert!(session.participants[0].group_ids.contains("family"));

        let missing = store
            .add_participant(
                "nope",
                Participant::new("b", "Bob", "b@example.com", Vec::<String>::new()),
            )
            .await;
        assert!(matches!(missing, Err(DrawError::SessionNotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_participant_clears_assignments() {
        let store = InMemorySessionStore::new();
        store.create_session("s1", "Session").await;
        store.add_participant("s1", participant("a")).await.unwrap();
        store.add_participant("s1", participant("b")).await.unwrap();
        store
            .replace_assignments("s1", vec![Assignment::new("a", "b"), Assignment::new("b", "a")])
            .await
            .unwrap();

        store.remove_participant("s1", "a").await.unwrap();

        let session = store.session("s1").await.unwrap();
        assert_eq!(session.participants.len(), 1);
        assert!(session.assignments.is_empty());

        let missing = store.remove_participant("s1", "a").await;
        assert!(matches!(missing, Err(DrawError::ParticipantNotFound { .. })));
    }
}
