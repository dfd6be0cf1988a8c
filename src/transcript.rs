//! Transcript message types and the in-memory transcript store

use crate::catalog::CatalogOption;
use crate::runtime::TranscriptStore;
use crate::state_machine::WizardStep;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

/// Who sent a message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message payload: plain text or a rendered option list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    Text(String),
    Options {
        step: WizardStep,
        options: Vec<CatalogOption>,
    },
}

impl MessageBody {
    #[allow(dead_code)] // used by tests
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageBody::Text(text) => Some(text),
            MessageBody::Options { .. } => None,
        }
    }

    pub fn options(&self) -> Option<&[CatalogOption]> {
        match self {
            MessageBody::Text(_) => None,
            MessageBody::Options { options, .. } => Some(options),
        }
    }
}

/// Immutable transcript entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sequence_id: u64,
    pub role: Role,
    pub body: MessageBody,
    pub created_at: DateTime<Utc>,
}

/// Append-only transcript kept for the lifetime of one conversation
#[derive(Debug, Default)]
pub struct MemoryTranscript {
    messages: Mutex<Vec<Message>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        // A poisoned lock still holds a consistent Vec: pushes are the only mutation.
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl TranscriptStore for MemoryTranscript {
    async fn append(
        &self,
        conversation_id: &str,
        role: Role,
        body: MessageBody,
    ) -> Result<Message, String> {
        let mut messages = self.lock();
        let sequence_id = messages.last().map_or(1, |m| m.sequence_id + 1);
        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            sequence_id,
            role,
            body,
            created_at: Utc::now(),
        };
        messages.push(message.clone());
        Ok(message)
    }

    async fn messages(&self) -> Result<Vec<Message>, String> {
        Ok(self.lock().clone())
    }
}
