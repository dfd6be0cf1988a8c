//! Runtime for executing wizard conversations
//!
//! One runtime task per conversation. The presentation talks to it through a
//! [`WizardHandle`]: user actions go in as events, view updates come back on a
//! broadcast channel and the latest state is readable at any time.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::WizardRuntime;
pub use traits::*;

use crate::catalog::OptionCatalog;
use crate::state_machine::{Event, StrategyConfig, WizardContext, WizardState, WizardStep};
use crate::transcript::Message;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

/// Events sent to the presentation
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Message(Message),
    Typing(bool),
    Step {
        step: WizardStep,
        placeholder: &'static str,
    },
    /// An action was refused; nothing changed
    Rejected {
        reason: String,
    },
    Completed {
        config: StrategyConfig,
    },
}

/// Latest state as seen by the presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub step: WizardStep,
    pub typing: bool,
    pub custom_task_pending: bool,
    pub config: StrategyConfig,
}

impl From<&WizardState> for StateView {
    fn from(state: &WizardState) -> Self {
        Self {
            step: state.step,
            typing: state.is_typing(),
            custom_task_pending: state.custom_task_pending,
            config: state.config.clone(),
        }
    }
}

/// Full conversation dump for export
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub conversation_id: String,
    pub module: String,
    #[serde(flatten)]
    pub state: StateView,
    pub messages: Vec<Message>,
}

/// Errors returned to the presentation when forwarding an action
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Input is empty")]
    BlankInput,
    #[error("Wizard runtime has stopped")]
    Closed,
    #[error("Transcript unavailable: {0}")]
    Transcript(String),
}

impl From<mpsc::error::SendError<Event>> for SubmitError {
    fn from(_: mpsc::error::SendError<Event>) -> Self {
        SubmitError::Closed
    }
}

/// Handle to interact with a running wizard
#[derive(Clone)]
pub struct WizardHandle {
    context: WizardContext,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<ViewEvent>,
    state_rx: watch::Receiver<StateView>,
    store: Arc<dyn TranscriptStore>,
}

impl WizardHandle {
    pub fn conversation_id(&self) -> &str {
        &self.context.conversation_id
    }

    /// Post the greeting and ask for the task
    pub async fn start(&self) -> Result<(), SubmitError> {
        self.event_tx.send(Event::Start).await?;
        Ok(())
    }

    pub async fn submit_option(&self, option_id: &str) -> Result<(), SubmitError> {
        self.event_tx.send(Event::option(option_id)).await?;
        Ok(())
    }

    /// Forward free text. Blank input never reaches the state machine.
    pub async fn submit_text(&self, text: &str) -> Result<(), SubmitError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitError::BlankInput);
        }
        self.event_tx.send(Event::text(text)).await?;
        Ok(())
    }

    /// Drop the reply the assistant is typing, if any
    pub async fn reset(&self) -> Result<(), SubmitError> {
        self.event_tx.send(Event::Reset).await?;
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.broadcast_tx.subscribe()
    }

    pub fn state(&self) -> StateView {
        self.state_rx.borrow().clone()
    }

    /// Receiver that changes whenever the runtime finishes an event
    #[allow(dead_code)] // used by tests
    pub fn watch_state(&self) -> watch::Receiver<StateView> {
        self.state_rx.clone()
    }

    pub async fn transcript(&self) -> Result<Vec<Message>, SubmitError> {
        self.store.messages().await.map_err(SubmitError::Transcript)
    }

    pub async fn snapshot(&self) -> Result<Snapshot, SubmitError> {
        Ok(Snapshot {
            conversation_id: self.context.conversation_id.clone(),
            module: self.context.module.clone(),
            state: self.state(),
            messages: self.transcript().await?,
        })
    }
}

/// Start a runtime for `context` on the current tokio runtime
pub fn spawn_wizard<S, P>(
    context: WizardContext,
    catalog: Arc<dyn OptionCatalog>,
    store: Arc<S>,
    planner: Arc<P>,
) -> WizardHandle
where
    S: TranscriptStore + 'static,
    P: PlanGenerator + 'static,
{
    let initial = WizardState::new();
    let (event_tx, event_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(128);
    let (state_tx, state_rx) = watch::channel(StateView::from(&initial));

    let runtime = WizardRuntime::new(
        context.clone(),
        initial,
        catalog,
        store.clone(),
        planner,
        event_rx,
        event_tx.downgrade(),
        broadcast_tx.clone(),
        state_tx,
    );

    let conv_id = context.conversation_id.clone();
    tokio::spawn(async move {
        runtime.run().await;
        tracing::debug!(conv_id = %conv_id, "Wizard task finished");
    });

    WizardHandle {
        context,
        event_tx,
        broadcast_tx,
        state_rx,
        store,
    }
}
