//! Effects produced by state transitions

use super::state::{StrategyConfig, WizardStep};
use crate::catalog::CatalogOption;
use crate::transcript::{MessageBody, Role};
use std::time::Duration;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { role: Role, body: MessageBody },

    /// Show or hide the typing indicator
    SetTyping(bool),

    /// Fire `Event::ReplyDue { ticket }` after `delay`
    ScheduleReply { ticket: u64, delay: Duration },

    /// Cancel the timer of the pending reply
    CancelPendingReply { ticket: u64 },

    /// The conversation reached its summary; hand the answers over
    PlanReady { config: StrategyConfig },

    /// Prompt construction failed; the conversation stays on `step`
    ReportStall { step: WizardStep, reason: String },
}

impl Effect {
    pub fn user_text(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::User,
            body: MessageBody::Text(text.into()),
        }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            body: MessageBody::Text(text.into()),
        }
    }

    pub fn assistant_options(step: WizardStep, options: Vec<CatalogOption>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            body: MessageBody::Options { step, options },
        }
    }

    #[allow(dead_code)] // used by tests
    pub fn is_append(&self, role: Role) -> bool {
        matches!(self, Effect::AppendMessage { role: r, .. } if *r == role)
    }
}
