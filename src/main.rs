//! MIPE - conversational business-consulting wizard
//!
//! Walks a client through a fixed sequence of questions (task, timeframe,
//! team, budget, goal) and hands the collected strategy to plan generation.

mod catalog;
mod config;
mod prompts;
mod runtime;
mod state_machine;
mod terminal;
mod transcript;

use catalog::{OptionCatalog, StaticCatalog};
use config::{AppConfig, LogFormat};
use runtime::{spawn_wizard, LoggedPlanGenerator};
use state_machine::WizardContext;
use std::sync::Arc;
use transcript::MemoryTranscript;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mipe=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    init_logging(config.log_format);

    let catalog: Arc<dyn OptionCatalog> = Arc::new(StaticCatalog);
    let mut lines = terminal::stdin_lines();

    let module = match config.module.clone() {
        Some(module) => module,
        None => match terminal::choose_module(&mut lines, catalog.modules()).await? {
            Some(module) => module,
            None => return Ok(()),
        },
    };

    let context = WizardContext::new(config.conversation_id(), module);
    tracing::info!(conv_id = %context.conversation_id, module = %context.module, "Starting consultation");

    let handle = spawn_wizard(
        context,
        catalog,
        Arc::new(MemoryTranscript::new()),
        Arc::new(LoggedPlanGenerator),
    );
    terminal::run(&handle, &mut lines).await?;

    tracing::info!(conv_id = %handle.conversation_id(), "Consultation closed");
    Ok(())
}
