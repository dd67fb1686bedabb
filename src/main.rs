use clap::Parser;
use santa_draw::adapters::store::InMemorySessionStore;
use santa_draw::config::toml_config::{SessionFile, DEFAULT_SENDER};
use santa_draw::core::draw::DEFAULT_MAX_ATTEMPTS;
use santa_draw::domain::ports::SessionStore;
use santa_draw::utils::{logger, validation::Validate};
use santa_draw::{CliConfig, DrawEngine, OutboxMailer};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting santa-draw CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            santa_draw::utils::error::ErrorSeverity::Low => 0,
            santa_draw::utils::error::ErrorSeverity::Medium => 2,
            santa_draw::utils::error::ErrorSeverity::High => 1,
            santa_draw::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> santa_draw::Result<()> {
    let session_file = SessionFile::from_file(&config.session_file)?;
    session_file.validate()?;

    let max_attempts = config
        .max_attempts
        .or_else(|| session_file.draw.as_ref().and_then(|d| d.max_attempts))
        .unwrap_or(DEFAULT_MAX_ATTEMPTS);

    let sender = match &session_file.smtp {
        Some(smtp) => smtp.resolve()?.sender,
        None => DEFAULT_SENDER.to_string(),
    };

    let session_id = Path::new(&config.session_file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("session")
        .to_string();
    let session = session_file.into_session(&session_id);
    tracing::info!(
        "Loaded session '{}' with {} participants in {} groups",
        session.name,
        session.participants.len(),
        session.groups.len()
    );

    let store = InMemorySessionStore::new();
    store.insert_session(session).await;

    let outbox_dir = Path::new(&config.output_path).join("outbox");
    let mailer = OutboxMailer::new(outbox_dir);
    let engine =
        DrawEngine::new_with_options(store.clone(), mailer, sender, max_attempts, config.seed);

    let assignments = engine.run_draw(&session_id).await?;
    write_exports(&config.output_path, &store, &session_id).await?;

    println!("✅ Draw complete: {} assignments", assignments.len());
    println!("📁 Exports saved to: {}", config.output_path);

    if config.send {
        let sent = engine.send_all(&session_id).await?;
        println!("📬 {} notifications written to the outbox", sent);
    }

    Ok(())
}

async fn write_exports(
    output_path: &str,
    store: &InMemorySessionStore,
    session_id: &str,
) -> santa_draw::Result<()> {
    let session = store.session(session_id).await?;
    fs::create_dir_all(output_path)?;

    let csv_path = Path::new(output_path).join("assignments.csv");
    let mut writer = csv::Writer::from_path(&csv_path)?;
    writer.write_record(["giver_name", "giver_email", "receiver_name", "receiver_email"])?;
    for assignment in &session.assignments {
        let giver = session.participant(&assignment.giver_id).ok_or_else(|| {
            santa_draw::DrawError::ParticipantNotFound {
                id: assignment.giver_id.clone(),
            }
        })?;
        let receiver = session.participant(&assignment.receiver_id).ok_or_else(|| {
            santa_draw::DrawError::ParticipantNotFound {
                id: assignment.receiver_id.clone(),
            }
        })?;
        writer.write_record([&giver.name, &giver.email, &receiver.name, &receiver.email])?;
    }
    writer.flush()?;

    let json_path = Path::new(output_path).join("assignments.json");
    fs::write(&json_path, serde_json::to_string_pretty(&session.assignments)?)?;

    tracing::debug!(
        "Wrote {} and {}",
        csv_path.display(),
        json_path.display()
    );
    Ok(())
}
