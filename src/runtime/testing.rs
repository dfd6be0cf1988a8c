//! Mock implementations for testing
//!
//! These mocks drive the runtime end to end without a terminal.

use super::traits::*;
use super::{spawn_wizard, StateView, ViewEvent, WizardHandle};
use crate::catalog::StaticCatalog;
use crate::state_machine::{StrategyConfig, WizardContext, WizardStep};
use crate::transcript::{MemoryTranscript, Message};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

// ============================================================================
// Recording Plan Generator
// ============================================================================

/// Plan generator that keeps every config it is handed
#[derive(Debug, Default)]
pub struct RecordingPlanGenerator {
    pub submitted: Mutex<Vec<(String, StrategyConfig)>>,
}

impl RecordingPlanGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<(String, StrategyConfig)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanGenerator for RecordingPlanGenerator {
    async fn submit(&self, conversation_id: &str, config: &StrategyConfig) -> Result<(), String> {
        self.submitted
            .lock()
            .unwrap()
            .push((conversation_id.to_string(), config.clone()));
        Ok(())
    }
}

// ============================================================================
// Test Runtime Builder
// ============================================================================

/// Helper for building test runtimes with minimal boilerplate
pub struct TestRuntime {
    pub handle: WizardHandle,
    pub store: Arc<MemoryTranscript>,
    pub planner: Arc<RecordingPlanGenerator>,
    pub events: broadcast::Receiver<ViewEvent>,
}

pub struct TestRuntimeBuilder {
    conv_id: String,
    module: String,
}

impl TestRuntime {
    pub fn builder() -> TestRuntimeBuilder {
        TestRuntimeBuilder {
            conv_id: "test-conv".to_string(),
            module: "ai".to_string(),
        }
    }
}

impl TestRuntimeBuilder {
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn conv_id(mut self, id: impl Into<String>) -> Self {
        self.conv_id = id.into();
        self
    }

    pub fn build(self) -> TestRuntime {
        let store = Arc::new(MemoryTranscript::new());
        let planner = Arc::new(RecordingPlanGenerator::new());
        let handle = spawn_wizard(
            WizardContext::new(self.conv_id, self.module),
            Arc::new(StaticCatalog),
            store.clone(),
            planner.clone(),
        );
        let events = handle.subscribe();
        TestRuntime {
            handle,
            store,
            planner,
            events,
        }
    }
}

const WAIT: Duration = Duration::from_secs(10);

impl TestRuntime {
    /// Wait until the state satisfies `predicate`
    pub async fn wait_for(&self, predicate: impl FnMut(&StateView) -> bool) -> bool {
        let mut rx = self.handle.watch_state();
        let reached = matches!(tokio::time::timeout(WAIT, rx.wait_for(predicate)).await, Ok(Ok(_)));
        reached
    }

    /// Wait until the assistant has finished replying at `step`
    pub async fn settle_at(&self, step: WizardStep) -> bool {
        self.wait_for(|s| s.step == step && !s.typing).await
    }

    /// Start and wait for the task question
    pub async fn started(self) -> Self {
        self.handle.start().await.unwrap();
        assert!(self.settle_at(WizardStep::Task).await);
        self
    }

    /// Pick an option and wait for the assistant to settle at `next`
    pub async fn pick(&self, option_id: &str, next: WizardStep) {
        self.handle.submit_option(option_id).await.unwrap();
        assert!(self.settle_at(next).await, "never reached {next} after {option_id}");
    }

    /// Drain broadcast events until one matches
    pub async fn next_matching(&mut self, mut predicate: impl FnMut(&ViewEvent) -> bool) -> Option<ViewEvent> {
        let deadline = tokio::time::Instant::now() + WAIT;
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(Duration::from_millis(50), self.events.recv()).await {
                Ok(Ok(event)) if predicate(&event) => return Some(event),
                Ok(Ok(_)) | Err(_) => {}
                Ok(Err(broadcast::error::RecvError::Lagged(_))) => {}
                Ok(Err(broadcast::error::RecvError::Closed)) => return None,
            }
        }
        None
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.handle.transcript().await.unwrap()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CUSTOM_TASK_ID, GOAL_GUIDE_ID, GOAL_SKIP_ID};
    use crate::runtime::SubmitError;
    use crate::transcript::{MessageBody, Role};

    fn text(message: &Message) -> &str {
        message.body.as_text().unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_greets_then_asks_for_task() {
        let rt = TestRuntime::builder().build().started().await;

        let msgs = rt.messages().await;
        assert_eq!(msgs.len(), 3);
        assert_eq!(rt.store.messages().await.unwrap(), msgs);
        assert!(msgs.iter().all(|m| m.role == Role::Assistant));
        assert!(msgs[2].body.options().is_some_and(|o| o.len() == 11));
        assert_eq!(rt.handle.state().config.module.as_deref(), Some("ai"));
    }

    /// End to end: module "ai" then the chatbot-sales task
    #[tokio::test(start_paused = true)]
    async fn test_chatbot_sales_end_to_end() {
        let rt = TestRuntime::builder().build().started().await;
        rt.pick("chatbot-sales", WizardStep::Time).await;

        let state = rt.handle.state();
        assert_eq!(state.config.task.as_deref(), Some("chatbot-sales"));

        let msgs = rt.messages().await;
        assert_eq!(msgs.len(), 6);
        assert_eq!(msgs[3].role, Role::User);
        assert_eq!(msgs[4].role, Role::Assistant);
        assert!(msgs[4].body.as_text().is_some());
        match &msgs[5].body {
            MessageBody::Options { step, options } => {
                assert_eq!(*step, WizardStep::Time);
                assert_eq!(options.len(), 3);
            }
            MessageBody::Text(_) => panic!("Expected option list"),
        }
        assert!(msgs.windows(2).all(|w| w[0].sequence_id < w[1].sequence_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_walk_hands_off_once() {
        let rt = TestRuntime::builder().module("data").build().started().await;
        rt.pick("kpi-dashboard", WizardStep::Time).await;
        rt.pick("standard", WizardStep::Team).await;
        rt.pick("lean", WizardStep::Budget).await;
        rt.pick("mid", WizardStep::Goal).await;
        rt.pick(GOAL_GUIDE_ID, WizardStep::GoalQna).await;
        rt.handle.submit_text("aumentar ventas").await.unwrap();
        assert!(rt.settle_at(WizardStep::Summary).await);

        let submissions = rt.planner.submissions();
        assert_eq!(submissions.len(), 1);
        let (conv_id, config) = &submissions[0];
        assert_eq!(conv_id, "test-conv");
        assert_eq!(config.module.as_deref(), Some("data"));
        assert_eq!(config.budget.as_deref(), Some("mid"));
        assert_eq!(config.goal.as_deref(), Some("aumentar ventas"));

        // Further input is refused
        let before = rt.messages().await.len();
        rt.handle.submit_text("otra cosa").await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(rt.messages().await.len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_goal_skip_completes_without_goal() {
        let mut rt = TestRuntime::builder().build().started().await;
        for (option, next) in [
            ("chatbot-sales", WizardStep::Time),
            ("express", WizardStep::Team),
            ("full", WizardStep::Budget),
            ("low", WizardStep::Goal),
            (GOAL_SKIP_ID, WizardStep::Summary),
        ] {
            rt.pick(option, next).await;
        }

        let completed = rt
            .next_matching(|e| matches!(e, ViewEvent::Completed { .. }))
            .await;
        match completed {
            Some(ViewEvent::Completed { config }) => assert!(config.goal.is_none()),
            other => panic!("Expected completion, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_filtered_at_boundary() {
        let rt = TestRuntime::builder().build().started().await;
        let result = rt.handle.submit_text("   \t ").await;
        assert!(matches!(result, Err(SubmitError::BlankInput)));
        assert_eq!(rt.messages().await.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_while_typing_rejected() {
        let mut rt = TestRuntime::builder().build().started().await;
        rt.handle.submit_option("chatbot-sales").await.unwrap();
        rt.handle.submit_option("lead-scoring").await.unwrap();

        let rejected = rt
            .next_matching(|e| matches!(e, ViewEvent::Rejected { .. }))
            .await;
        assert!(rejected.is_some());

        assert!(rt.settle_at(WizardStep::Time).await);
        let state = rt.handle.state();
        assert_eq!(state.config.task.as_deref(), Some("chatbot-sales"));
        let users = rt
            .messages()
            .await
            .iter()
            .filter(|m| m.role == Role::User)
            .count();
        assert_eq!(users, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_reply() {
        let rt = TestRuntime::builder().build().started().await;
        rt.handle.submit_option("chatbot-sales").await.unwrap();
        rt.handle.reset().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let state = rt.handle.state();
        assert_eq!(state.step, WizardStep::Task);
        assert!(!state.typing);
        assert!(state.config.task.is_none());
        // Greeting, task prompt, task options, the user's pick
        assert_eq!(rt.messages().await.len(), 4);

        // The step can still be answered afterwards
        rt.pick("lead-scoring", WizardStep::Time).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_welcome_keeps_conversation_usable() {
        let mut rt = TestRuntime::builder().build();
        rt.handle.start().await.unwrap();
        rt.handle.reset().await.unwrap();

        let rejected = rt
            .next_matching(|e| matches!(e, ViewEvent::Rejected { .. }))
            .await;
        assert!(rejected.is_some());
        assert!(rt.settle_at(WizardStep::Task).await);

        rt.pick("chatbot-sales", WizardStep::Time).await;
        let greetings = rt
            .messages()
            .await
            .iter()
            .filter(|m| m.body.as_text() == Some(crate::prompts::GREETING))
            .count();
        assert_eq!(greetings, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_free_text_ack_precedes_team_prompt() {
        let rt = TestRuntime::builder().build().started().await;
        rt.pick("chatbot-sales", WizardStep::Time).await;
        rt.handle.submit_text("  en 3 meses ").await.unwrap();
        assert!(rt.settle_at(WizardStep::Team).await);

        let msgs = rt.messages().await;
        let tail = &msgs[msgs.len() - 4..];
        assert_eq!(tail[0].role, Role::User);
        assert_eq!(text(&tail[0]), "en 3 meses");
        assert!(text(&tail[1]).contains("en 3 meses"));
        assert!(tail[2].body.as_text().is_some());
        assert!(matches!(
            tail[3].body,
            MessageBody::Options {
                step: WizardStep::Team,
                ..
            }
        ));
        assert_eq!(rt.handle.state().config.timeframe.as_deref(), Some("en 3 meses"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_task_then_free_text() {
        let rt = TestRuntime::builder().module("marketing").build().started().await;
        rt.handle.submit_option(CUSTOM_TASK_ID).await.unwrap();
        assert!(rt.wait_for(|s| s.custom_task_pending && !s.typing).await);
        assert_eq!(rt.handle.state().step, WizardStep::Task);

        rt.handle.submit_text("migrar el CRM").await.unwrap();
        assert!(rt.settle_at(WizardStep::Time).await);
        assert_eq!(rt.handle.state().config.task.as_deref(), Some("migrar el CRM"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_event_carries_placeholder() {
        let mut rt = TestRuntime::builder().build().started().await;
        rt.handle.submit_option("chatbot-sales").await.unwrap();
        let step = rt
            .next_matching(|e| matches!(e, ViewEvent::Step { step: WizardStep::Time, .. }))
            .await;
        match step {
            Some(ViewEvent::Step { placeholder, .. }) => {
                assert_eq!(placeholder, WizardStep::Time.placeholder());
            }
            other => panic!("Expected step change, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_serializes_transcript() {
        let rt = TestRuntime::builder().conv_id("snap-conv").build().started().await;
        rt.pick("chatbot-sales", WizardStep::Time).await;

        let snapshot = rt.handle.snapshot().await.unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["conversation_id"], "snap-conv");
        assert_eq!(json["step"], "time");
        assert_eq!(json["config"]["task"], "chatbot-sales");
        assert_eq!(json["messages"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_start_ignored() {
        let rt = TestRuntime::builder().build();
        // A second start is rejected but the runtime keeps going
        rt.handle.start().await.unwrap();
        rt.handle.start().await.unwrap();
        assert!(rt.settle_at(WizardStep::Task).await);
        assert_eq!(rt.messages().await.len(), 3);
    }
}
