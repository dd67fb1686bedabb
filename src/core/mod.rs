pub mod draw;
pub mod engine;
pub mod template;

pub use crate::domain::model::{Assignment, DrawSession, EmailMessage, ExclusionGroup, Participant};
pub use crate::domain::ports::{Mailer, SessionStore};
pub use crate::utils::error::Result;
