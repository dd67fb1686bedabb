use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("At least 2 participants are required for a draw, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("No collision-free assignment found within {attempts} attempts")]
    AssignmentInfeasible { attempts: u32 },

    #[error("Draw session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Participant not found: {id}")]
    ParticipantNotFound { id: String },

    #[error("No assignment with giver: {giver_id}")]
    AssignmentNotFound { giver_id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] regex::Error),

    #[error("Configuration error for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Draw,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DrawError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrawError::InsufficientParticipants { .. } | DrawError::AssignmentInfeasible { .. } => {
                ErrorCategory::Draw
            }
            DrawError::SessionNotFound { .. }
            | DrawError::ParticipantNotFound { .. }
            | DrawError::AssignmentNotFound { .. }
            | DrawError::SerializationError(_)
            | DrawError::CsvError(_) => ErrorCategory::Data,
            DrawError::TomlError(_)
            | DrawError::TemplateError(_)
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DrawError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Both draw failures are terminal for the run but fixable by the
            // user (add participants, loosen a group), so they map to the
            // retryable tier rather than critical.
            DrawError::InsufficientParticipants { .. } => ErrorSeverity::Medium,
            DrawError::AssignmentInfeasible { .. } => ErrorSeverity::Medium,
            DrawError::SessionNotFound { .. }
            | DrawError::ParticipantNotFound { .. }
            | DrawError::AssignmentNotFound { .. } => ErrorSeverity::High,
            DrawError::SerializationError(_) | DrawError::CsvError(_) => ErrorSeverity::High,
            DrawError::TomlError(_)
            | DrawError::TemplateError(_)
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => ErrorSeverity::High,
            DrawError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrawError::InsufficientParticipants { count } => format!(
                "A draw needs at least 2 participants (this session has {}).",
                count
            ),
            DrawError::AssignmentInfeasible { .. } => {
                "Could not find a pairing that avoids all exclusion groups.".to_string()
            }
            DrawError::SessionNotFound { id } => format!("Unknown draw session \"{}\".", id),
            DrawError::ParticipantNotFound { id } => format!("Unknown participant \"{}\".", id),
            DrawError::AssignmentNotFound { giver_id } => {
                format!("No assignment exists for giver \"{}\".", giver_id)
            }
            DrawError::TomlError(_) => "The session file is not valid TOML.".to_string(),
            DrawError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}.", field, reason)
            }
            DrawError::MissingConfigError { field } => {
                format!("Configuration field {} is required.", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DrawError::InsufficientParticipants { .. } => {
                "Add more participants to the session and run the draw again.".to_string()
            }
            DrawError::AssignmentInfeasible { .. } => {
                "Remove or resize a restrictive exclusion group (or raise max_attempts), then retry."
                    .to_string()
            }
            DrawError::SessionNotFound { .. } => {
                "Check the session id against the configured sessions.".to_string()
            }
            DrawError::ParticipantNotFound { .. } | DrawError::AssignmentNotFound { .. } => {
                "Run the draw again so assignments match the current participant list.".to_string()
            }
            DrawError::TomlError(_)
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => "Fix the session file and rerun.".to_string(),
            DrawError::IoError(_) => {
                "Check that the output path exists and is writable.".to_string()
            }
            _ => "See the log output for details.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
