pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{mailer::OutboxMailer, store::InMemorySessionStore};
pub use config::CliConfig;
pub use core::{draw::generate_assignments, engine::DrawEngine};
pub use utils::error::{DrawError, Result};
