pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "santa-draw")]
#[command(about = "Run Secret Santa draws with exclusion groups")]
pub struct CliConfig {
    /// Session definition file (TOML)
    #[arg(long, default_value = "session.toml")]
    pub session_file: String,

    /// Directory for assignment exports and the mail outbox
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Fix the random seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the attempt budget for the draw
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Render notifications into the outbox after a successful draw
    #[arg(long)]
    pub send: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("session_file", &self.session_file)?;
        validation::validate_non_empty_string("output_path", &self.output_path)?;
        if let Some(max_attempts) = self.max_attempts {
            validation::validate_range("max_attempts", max_attempts, 1, u32::MAX)?;
        }
        Ok(())
    }
}
