//! Events that can occur in a wizard conversation

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open the conversation: greet and ask for the task
    Start,

    // User events
    OptionSelected {
        option_id: String,
    },
    TextSubmitted {
        text: String,
    },
    /// Drop the pending reply, if any. Step and answers are kept.
    Reset,

    // Timer events
    ReplyDue {
        ticket: u64,
    },
}

impl Event {
    pub fn option(option_id: impl Into<String>) -> Self {
        Event::OptionSelected {
            option_id: option_id.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Event::TextSubmitted { text: text.into() }
    }

    /// Whether the event is a user action that answers the current step
    #[allow(dead_code)] // used by tests
    pub fn is_submission(&self) -> bool {
        matches!(self, Event::OptionSelected { .. } | Event::TextSubmitted { .. })
    }
}
