use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A draw participant with their exclusion-group memberships already
/// flattened into a plain id set, so validity checks are a set lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub group_ids: HashSet<String>,
}

impl Participant {
    pub fn new<I, G>(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            group_ids: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// True when both participants belong to at least one common exclusion
    /// group. Such a pair must never appear as giver/receiver.
    pub fn shares_group(&self, other: &Participant) -> bool {
        !self.group_ids.is_disjoint(&other.group_ids)
    }
}

/// A partition label. Two members of the same group are never paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionGroup {
    pub id: String,
    pub name: String,
}

/// One giver→receiver pair of a completed draw, plus notification state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub giver_id: String,
    pub receiver_id: String,
    pub email_sent_at: Option<DateTime<Utc>>,
    pub email_send_count: u32,
}

impl Assignment {
    pub fn new(giver_id: impl Into<String>, receiver_id: impl Into<String>) -> Self {
        Self {
            giver_id: giver_id.into(),
            receiver_id: receiver_id.into(),
            email_sent_at: None,
            email_send_count: 0,
        }
    }
}

/// Aggregate root: participants, groups and the current assignment set.
/// A successful draw replaces `assignments` wholesale; there is no partial
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSession {
    pub id: String,
    pub name: String,
    pub email_subject_template: Option<String>,
    pub email_body_template: Option<String>,
    pub participants: Vec<Participant>,
    pub groups: Vec<ExclusionGroup>,
    pub assignments: Vec<Assignment>,
}

impl DrawSession {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email_subject_template: None,
            email_body_template: None,
            participants: Vec::new(),
            groups: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }
}

/// A fully rendered notification, ready for a `Mailer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_group() {
        let a = Participant::new("a", "Alice", "alice@example.com", ["family"]);
        let b = Participant::new("b", "Bob", "bob@example.com", ["family", "office"]);
        let c = Participant::new("c", "Carol", "carol@example.com", Vec::<String>::new());

        assert!(a.shares_group(&b));
        assert!(b.shares_group(&a));
        assert!(!a.shares_group(&c));
        assert!(!c.shares_group(&b));
    }

    #[test]
    fn test_group_memberships_are_deduplicated() {
        let a = Participant::new("a", "Alice", "alice@example.com", ["g1", "g1", "g2"]);
        assert_eq!(a.group_ids.len(), 2);
    }
}
