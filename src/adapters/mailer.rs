use crate::domain::model::EmailMessage;
use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each rendered notification to a file in an outbox directory,
/// one file per recipient. Stands in for real transport, which is handled
/// outside this crate.
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    outbox_dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
        }
    }

    pub fn message_path(&self, recipient: &str) -> PathBuf {
        let file_name: String = recipient
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Path::new(&self.outbox_dir).join(format!("{}.eml", file_name))
    }
}

impl Mailer for OutboxMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        fs::create_dir_all(&self.outbox_dir)?;

        let content = format!(
            "From: {}\nTo: {}\nSubject: {}\n\n{}\n",
            message.from, message.to, message.subject, message.body
        );
        let path = self.message_path(&message.to);
        fs::write(&path, content)?;

        tracing::debug!("Wrote notification for {} to {}", message.to, path.display());
        Ok(())
    }
}
