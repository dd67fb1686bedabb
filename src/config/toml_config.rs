use crate::domain::model::{DrawSession, ExclusionGroup, Participant};
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Sender used when the session file has no `[smtp]` section at all.
pub const DEFAULT_SENDER: &str = "no-reply@localhost";

/// One draw session described as a TOML file: who takes part, which
/// exclusion groups exist, how the draw and the notifications behave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub session: SessionConfig,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub participants: Vec<ParticipantConfig>,
    pub draw: Option<DrawConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub description: Option<String>,
    pub email_subject_template: Option<String>,
    pub email_body_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    /// Defaults to the email address when omitted.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl ParticipantConfig {
    pub fn effective_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    pub max_attempts: Option<u32>,
}

/// SMTP settings in the session file. Every field falls back to the
/// matching `SMTP_*` environment variable; only the resolved sender is
/// consumed in-process (message transport happens elsewhere).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub secure: Option<bool>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub sender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}

impl SmtpConfig {
    /// Resolves the effective settings from the file plus `SMTP_HOST`,
    /// `SMTP_PORT`, `SMTP_SECURE`, `SMTP_USER`, `SMTP_PASS` and
    /// `SMTP_SENDER`. Port 465 means implicit TLS and 587 means STARTTLS,
    /// overriding any explicit `secure` flag for those two ports.
    pub fn resolve(&self) -> Result<SmtpSettings> {
        let host = self
            .host
            .clone()
            .or_else(|| std::env::var("SMTP_HOST").ok())
            .ok_or_else(|| DrawError::MissingConfigError {
                field: "smtp.host".to_string(),
            })?;

        let port = match self.port {
            Some(port) => port,
            None => {
                let raw = std::env::var("SMTP_PORT").map_err(|_| DrawError::MissingConfigError {
                    field: "smtp.port".to_string(),
                })?;
                raw.parse::<u16>()
                    .map_err(|_| DrawError::InvalidConfigValueError {
                        field: "smtp.port".to_string(),
                        value: raw.clone(),
                        reason: "Port must be a number between 1 and 65535".to_string(),
                    })?
            }
        };

        let secure = match port {
            465 => true,
            587 => false,
            _ => self
                .secure
                .or_else(|| std::env::var("SMTP_SECURE").ok().map(|v| v == "true"))
                .unwrap_or(false),
        };

        let user_name = self
            .user_name
            .clone()
            .or_else(|| std::env::var("SMTP_USER").ok());
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("SMTP_PASS").ok());

        let sender = self
            .sender
            .clone()
            .or_else(|| std::env::var("SMTP_SENDER").ok())
            .ok_or_else(|| DrawError::MissingConfigError {
                field: "smtp.sender".to_string(),
            })?;

        Ok(SmtpSettings {
            host,
            port,
            secure,
            user_name,
            password,
            sender,
        })
    }
}

impl SessionFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DrawError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        let file: SessionFile = toml::from_str(&processed)?;
        Ok(file)
    }

    /// Replaces `${VAR_NAME}` occurrences with the environment value, so
    /// secrets such as the SMTP password stay out of the session file.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Builds the domain aggregate. Group ids referenced by participants
    /// but never declared under `[[groups]]` are created on the fly with
    /// their id as display name; exclusion semantics only depend on the
    /// id sets either way.
    pub fn into_session(self, session_id: &str) -> DrawSession {
        let mut session = DrawSession::new(session_id, self.session.name.clone());
        session.email_subject_template = self.session.email_subject_template.clone();
        session.email_body_template = self.session.email_body_template.clone();

        let mut declared: HashSet<String> = HashSet::new();
        for group in &self.groups {
            declared.insert(group.id.clone());
            session.groups.push(ExclusionGroup {
                id: group.id.clone(),
                name: group.name.clone().unwrap_or_else(|| group.id.clone()),
            });
        }

        for participant in &self.participants {
            for group_id in &participant.groups {
                if declared.insert(group_id.clone()) {
                    session.groups.push(ExclusionGroup {
                        id: group_id.clone(),
                        name: group_id.clone(),
                    });
                }
            }
            session.participants.push(Participant::new(
                participant.effective_id(),
                participant.name.clone(),
                participant.email.clone(),
                participant.groups.iter().cloned(),
            ));
        }

        session
    }
}

impl Validate for SessionFile {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("session.name", &self.session.name)?;

        for participant in &self.participants {
            validation::validate_non_empty_string("participants.name", &participant.name)?;
            validation::validate_email("participants.email", &participant.email)?;
        }
        validation::validate_unique_ids(
            "participants.id",
            self.participants.iter().map(|p| p.effective_id()),
        )?;
        validation::validate_unique_ids("groups.id", self.groups.iter().map(|g| g.id.as_str()))?;

        if let Some(draw) = &self.draw {
            if let Some(max_attempts) = draw.max_attempts {
                validation::validate_range("draw.max_attempts", max_attempts, 1, u32::MAX)?;
            }
        }

        if let Some(smtp) = &self.smtp {
            if let Some(port) = smtp.port {
                validation::validate_range("smtp.port", port, 1, 65535)?;
            }
            if let Some(sender) = &smtp.sender {
                validation::validate_email("smtp.sender", sender)?;
            }
        }

        Ok(())
    }
}
