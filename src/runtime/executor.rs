//! Wizard runtime executor

use super::traits::{PlanGenerator, TranscriptStore};
use super::{StateView, ViewEvent};
use crate::catalog::OptionCatalog;
use crate::state_machine::{transition, Effect, Event, TransitionError, WizardContext, WizardState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// A one-shot reply timer that can be cancelled before it fires
#[derive(Debug)]
struct ScheduledReply {
    ticket: u64,
    cancel: CancellationToken,
}

/// Generic wizard runtime that can work with any transcript store and plan generator
pub struct WizardRuntime<S, P>
where
    S: TranscriptStore + 'static,
    P: PlanGenerator + 'static,
{
    context: WizardContext,
    state: WizardState,
    catalog: Arc<dyn OptionCatalog>,
    store: Arc<S>,
    planner: Arc<P>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so that dropping every handle ends the runtime even with a timer pending
    timer_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<ViewEvent>,
    state_tx: watch::Sender<StateView>,
    reply_timer: Option<ScheduledReply>,
}

impl<S, P> WizardRuntime<S, P>
where
    S: TranscriptStore + 'static,
    P: PlanGenerator + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: WizardContext,
        state: WizardState,
        catalog: Arc<dyn OptionCatalog>,
        store: Arc<S>,
        planner: Arc<P>,
        event_rx: mpsc::Receiver<Event>,
        timer_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<ViewEvent>,
        state_tx: watch::Sender<StateView>,
    ) -> Self {
        Self {
            context,
            state,
            catalog,
            store,
            planner,
            event_rx,
            timer_tx,
            broadcast_tx,
            state_tx,
            reply_timer: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            conv_id = %self.context.conversation_id,
            module = %self.context.module,
            "Starting wizard runtime"
        );

        while let Some(event) = self.event_rx.recv().await {
            // Rejections are already logged and broadcast
            let _ = self.process_event(event).await;
        }

        if let Some(timer) = self.reply_timer.take() {
            timer.cancel.cancel();
        }
        tracing::info!(conv_id = %self.context.conversation_id, "Wizard runtime stopped");
    }

    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        tracing::debug!(conv_id = %self.context.conversation_id, step = %self.state.step, ?event, "Processing event");

        let result = match transition(&self.state, &self.context, event, self.catalog.as_ref()) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    conv_id = %self.context.conversation_id,
                    step = %self.state.step,
                    error = %e,
                    "Event rejected"
                );
                let _ = self.broadcast_tx.send(ViewEvent::Rejected {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        let old_step = self.state.step;
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect).await;
        }

        if self.state.step != old_step {
            tracing::info!(
                conv_id = %self.context.conversation_id,
                from = %old_step,
                to = %self.state.step,
                "Step changed"
            );
            let _ = self.broadcast_tx.send(ViewEvent::Step {
                step: self.state.step,
                placeholder: self.state.step.placeholder(),
            });
            if self.state.is_complete() {
                tracing::info!(conv_id = %self.context.conversation_id, "Consultation complete");
            }
        }
        self.state_tx.send_replace(StateView::from(&self.state));
        Ok(())
    }

    /// Execute an effect
    async fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { role, body } => {
                match self
                    .store
                    .append(&self.context.conversation_id, role, body)
                    .await
                {
                    Ok(message) => {
                        let _ = self.broadcast_tx.send(ViewEvent::Message(message));
                    }
                    Err(e) => {
                        tracing::error!(conv_id = %self.context.conversation_id, error = %e, "Failed to append message");
                    }
                }
            }

            Effect::SetTyping(typing) => {
                let _ = self.broadcast_tx.send(ViewEvent::Typing(typing));
            }

            Effect::ScheduleReply { ticket, delay } => {
                self.schedule_reply(ticket, delay);
            }

            Effect::CancelPendingReply { ticket } => {
                if let Some(timer) = self.reply_timer.take_if(|t| t.ticket == ticket) {
                    tracing::debug!(ticket, "Cancelling reply timer");
                    timer.cancel.cancel();
                }
            }

            Effect::PlanReady { config } => {
                if let Err(e) = self
                    .planner
                    .submit(&self.context.conversation_id, &config)
                    .await
                {
                    tracing::error!(conv_id = %self.context.conversation_id, error = %e, "Plan hand-off failed");
                }
                let _ = self.broadcast_tx.send(ViewEvent::Completed { config });
            }

            Effect::ReportStall { step, reason } => {
                tracing::error!(
                    conv_id = %self.context.conversation_id,
                    step = %step,
                    reason = %reason,
                    "Could not build the next prompt, staying on current step"
                );
            }
        }
    }

    fn schedule_reply(&mut self, ticket: u64, delay: Duration) {
        if let Some(previous) = self.reply_timer.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let timer_tx = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::debug!(ticket, "Reply timer cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    if let Some(tx) = timer_tx.upgrade() {
                        let _ = tx.send(Event::ReplyDue { ticket }).await;
                    }
                }
            }
        });

        self.reply_timer = Some(ScheduledReply { ticket, cancel });
    }
}
