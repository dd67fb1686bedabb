use crate::core::draw::{self, DEFAULT_MAX_ATTEMPTS};
use crate::core::template::{TemplateRenderer, DEFAULT_BODY, DEFAULT_SUBJECT};
use crate::domain::model::{Assignment, DrawSession, EmailMessage, Participant};
use crate::domain::ports::{Mailer, SessionStore};
use crate::utils::error::{DrawError, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Drives the run-draw and notification operations against the session
/// store and mailer ports. The draw itself stays pure; this type owns the
/// load → generate → replace sequence around it.
pub struct DrawEngine<S: SessionStore, M: Mailer> {
    store: S,
    mailer: M,
    sender: String,
    max_attempts: u32,
    seed: Option<u64>,
}

impl<S: SessionStore, M: Mailer> DrawEngine<S, M> {
    pub fn new(store: S, mailer: M, sender: impl Into<String>) -> Self {
        Self::new_with_options(store, mailer, sender, DEFAULT_MAX_ATTEMPTS, None)
    }

    /// `seed` pins the random source for reproducible draws; `None` draws
    /// from entropy.
    pub fn new_with_options(
        store: S,
        mailer: M,
        sender: impl Into<String>,
        max_attempts: u32,
        seed: Option<u64>,
    ) -> Self {
        Self {
            store,
            mailer,
            sender: sender.into(),
            max_attempts,
            seed,
        }
    }

    /// Runs the draw for one session and replaces its assignment set.
    /// On any failure the previously stored assignments stay as they were.
    pub async fn run_draw(&self, session_id: &str) -> Result<Vec<Assignment>> {
        tracing::info!("Running draw for session '{}'", session_id);

        let participants = self.store.participants(session_id).await?;
        tracing::debug!("Loaded {} participants", participants.len());

        let assignments = match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                draw::generate_assignments(&participants, self.max_attempts, &mut rng)?
            }
            None => {
                let mut rng = rand::thread_rng();
                draw::generate_assignments(&participants, self.max_attempts, &mut rng)?
            }
        };

        self.store
            .replace_assignments(session_id, assignments.clone())
            .await?;
        tracing::info!("Stored {} assignments", assignments.len());

        Ok(assignments)
    }

    /// Renders and delivers one notification per assignment, stamping each
    /// assignment's delivery metadata after its message is handed off.
    pub async fn send_all(&self, session_id: &str) -> Result<usize> {
        let session = self.store.session(session_id).await?;
        let assignments = self.store.assignments(session_id).await?;
        let renderer = TemplateRenderer::new()?;

        let mut sent = 0;
        for assignment in &assignments {
            let message = self.render_assignment(&renderer, &session, assignment)?;
            self.mailer.send(&message).await?;
            self.store
                .mark_sent(session_id, &assignment.giver_id, Utc::now())
                .await?;
            sent += 1;
        }

        tracing::info!("Sent {} notifications for session '{}'", sent, session_id);
        Ok(sent)
    }

    /// Re-delivers the notification for a single giver.
    pub async fn resend(&self, session_id: &str, giver_id: &str) -> Result<()> {
        let session = self.store.session(session_id).await?;
        let assignments = self.store.assignments(session_id).await?;
        let assignment = assignments
            .iter()
            .find(|a| a.giver_id == giver_id)
            .ok_or_else(|| DrawError::AssignmentNotFound {
                giver_id: giver_id.to_string(),
            })?;

        let renderer = TemplateRenderer::new()?;
        let message = self.render_assignment(&renderer, &session, assignment)?;
        self.mailer.send(&message).await?;
        self.store.mark_sent(session_id, giver_id, Utc::now()).await?;

        tracing::info!(
            "Resent notification to giver '{}' in session '{}'",
            giver_id,
            session_id
        );
        Ok(())
    }

    fn render_assignment(
        &self,
        renderer: &TemplateRenderer,
        session: &DrawSession,
        assignment: &Assignment,
    ) -> Result<EmailMessage> {
        let giver = Self::participant(session, &assignment.giver_id)?;
        let receiver = Self::participant(session, &assignment.receiver_id)?;

        let subject = session
            .email_subject_template
            .as_deref()
            .unwrap_or(DEFAULT_SUBJECT);
        let body = session
            .email_body_template
            .as_deref()
            .unwrap_or(DEFAULT_BODY);

        Ok(renderer.compose(subject, body, &self.sender, giver, receiver))
    }

    fn participant<'a>(session: &'a DrawSession, id: &str) -> Result<&'a Participant> {
        session
            .participant(id)
            .ok_or_else(|| DrawError::ParticipantNotFound { id: id.to_string() })
    }
}
