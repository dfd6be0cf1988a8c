//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::state_machine::StrategyConfig;
use crate::transcript::{Message, MessageBody, Role};
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only storage for the conversation transcript
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a message; the store assigns id, sequence and timestamp
    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        body: MessageBody,
    ) -> Result<Message, String>;

    /// All messages in append order
    async fn messages(&self) -> Result<Vec<Message>, String>;
}

/// Receives the finalized answers once the summary is reached
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn submit(&self, conversation_id: &str, config: &StrategyConfig) -> Result<(), String>;
}

/// Plan generator that only records the hand-off in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggedPlanGenerator;

#[async_trait]
impl PlanGenerator for LoggedPlanGenerator {
    async fn submit(&self, conversation_id: &str, config: &StrategyConfig) -> Result<(), String> {
        let payload = serde_json::to_string(config).map_err(|e| e.to_string())?;
        tracing::info!(conv_id = %conversation_id, config = %payload, "Strategy ready for plan generation");
        Ok(())
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: TranscriptStore + ?Sized> TranscriptStore for Arc<T> {
    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        body: MessageBody,
    ) -> Result<Message, String> {
        (**self).append(conversation_id, role, body).await
    }

    async fn messages(&self) -> Result<Vec<Message>, String> {
        (**self).messages().await
    }
}

#[async_trait]
impl<T: PlanGenerator + ?Sized> PlanGenerator for Arc<T> {
    async fn submit(&self, conversation_id: &str, config: &StrategyConfig) -> Result<(), String> {
        (**self).submit(conversation_id, config).await
    }
}
