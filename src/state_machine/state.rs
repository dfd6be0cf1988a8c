//! Wizard state types

use serde::Serialize;
use std::time::Duration;

/// One stage of the consultation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Init,
    Task,
    Time,
    Team,
    Budget,
    Goal,
    GoalQna,
    Summary,
}

impl WizardStep {
    #[allow(dead_code)] // used by tests
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Init,
        WizardStep::Task,
        WizardStep::Time,
        WizardStep::Team,
        WizardStep::Budget,
        WizardStep::Goal,
        WizardStep::GoalQna,
        WizardStep::Summary,
    ];

    /// Position along the fixed path; transitions never decrease it
    #[allow(dead_code)] // used by tests
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        self == WizardStep::Summary
    }

    /// Whether the step accepts free text without a prior custom-entry request
    pub fn accepts_free_text(self) -> bool {
        matches!(self, WizardStep::Time | WizardStep::Goal | WizardStep::GoalQna)
    }

    /// Input hint shown by the presentation while this step is current
    pub fn placeholder(self) -> &'static str {
        match self {
            WizardStep::Init => "Elige un área para comenzar...",
            WizardStep::Task => "Selecciona una tarea o escribe la tuya...",
            WizardStep::Time => "Elige un plazo o escribe tu fecha objetivo...",
            WizardStep::Team => "Elige el tamaño del equipo...",
            WizardStep::Budget => "Elige un presupuesto...",
            WizardStep::Goal => "Elige cómo definir el objetivo...",
            WizardStep::GoalQna => "Escribe tu respuesta...",
            WizardStep::Summary => "Conversación completada",
        }
    }

    /// Config field written when this step is answered
    pub fn field(self) -> Option<ConfigField> {
        match self {
            WizardStep::Init => Some(ConfigField::Module),
            WizardStep::Task => Some(ConfigField::Task),
            WizardStep::Time => Some(ConfigField::Timeframe),
            WizardStep::Team => Some(ConfigField::TeamSize),
            WizardStep::Budget => Some(ConfigField::Budget),
            WizardStep::Goal | WizardStep::GoalQna => Some(ConfigField::Goal),
            WizardStep::Summary => None,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardStep::Init => "init",
            WizardStep::Task => "task",
            WizardStep::Time => "time",
            WizardStep::Team => "team",
            WizardStep::Budget => "budget",
            WizardStep::Goal => "goal",
            WizardStep::GoalQna => "goal_qna",
            WizardStep::Summary => "summary",
        };
        f.write_str(name)
    }
}

/// Named field of [`StrategyConfig`], used by prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Module,
    Task,
    Timeframe,
    TeamSize,
    Budget,
    Goal,
}

impl ConfigField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "module" => Some(ConfigField::Module),
            "task" => Some(ConfigField::Task),
            "timeframe" => Some(ConfigField::Timeframe),
            "team_size" => Some(ConfigField::TeamSize),
            "budget" => Some(ConfigField::Budget),
            "goal" => Some(ConfigField::Goal),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigField::Module => "module",
            ConfigField::Task => "task",
            ConfigField::Timeframe => "timeframe",
            ConfigField::TeamSize => "team_size",
            ConfigField::Budget => "budget",
            ConfigField::Goal => "goal",
        }
    }

    /// Step whose catalog holds the ids stored in this field
    pub fn source_step(self) -> WizardStep {
        match self {
            ConfigField::Module => WizardStep::Init,
            ConfigField::Task => WizardStep::Task,
            ConfigField::Timeframe => WizardStep::Time,
            ConfigField::TeamSize => WizardStep::Team,
            ConfigField::Budget => WizardStep::Budget,
            ConfigField::Goal => WizardStep::Goal,
        }
    }
}

/// Answers accumulated across the conversation.
///
/// Option selections store the option id, free text stores the trimmed text.
/// Every field is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrategyConfig {
    pub module: Option<String>,
    pub task: Option<String>,
    pub timeframe: Option<String>,
    pub team_size: Option<String>,
    pub budget: Option<String>,
    pub goal: Option<String>,
}

impl StrategyConfig {
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::Module => self.module.as_deref(),
            ConfigField::Task => self.task.as_deref(),
            ConfigField::Timeframe => self.timeframe.as_deref(),
            ConfigField::TeamSize => self.team_size.as_deref(),
            ConfigField::Budget => self.budget.as_deref(),
            ConfigField::Goal => self.goal.as_deref(),
        }
    }

    /// Set a field that has not been written yet.
    ///
    /// Returns false (and leaves the config untouched) if it was already set.
    pub fn set_once(&mut self, field: ConfigField, value: impl Into<String>) -> bool {
        let slot = match field {
            ConfigField::Module => &mut self.module,
            ConfigField::Task => &mut self.task,
            ConfigField::Timeframe => &mut self.timeframe,
            ConfigField::TeamSize => &mut self.team_size,
            ConfigField::Budget => &mut self.budget,
            ConfigField::Goal => &mut self.goal,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }
}

/// A value submitted by the user for the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Id of an option from the current step's catalog
    Option(String),
    /// Free-typed text, already trimmed
    Text(String),
}

impl Submission {
    pub fn value(&self) -> &str {
        match self {
            Submission::Option(id) | Submission::Text(id) => id,
        }
    }
}

/// What a scheduled reply does when its timer fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    /// Post the acknowledgement for free-typed timeframes, then advance
    AcknowledgeTimeframe { submission: Submission },
    /// Run the step transition for `answered`
    Advance {
        answered: WizardStep,
        submission: Submission,
    },
}

/// The one reply the assistant is "typing"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: u64,
    pub delay: Duration,
    pub kind: ReplyKind,
}

/// Full conversation state, passed into and returned from each transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub config: StrategyConfig,
    /// TASK is waiting for free text after the custom option was chosen
    pub custom_task_pending: bool,
    pub pending: Option<PendingReply>,
    pub next_ticket: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The typing indicator is shown exactly while a reply is pending
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }

    /// Whether free text is a valid answer right now
    pub fn accepts_free_text(&self) -> bool {
        self.step.accepts_free_text() || (self.step == WizardStep::Task && self.custom_task_pending)
    }
}

/// Per-conversation context that never changes during a conversation
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub conversation_id: String,
    /// Module chosen on the landing screen
    pub module: String,
}

impl WizardContext {
    pub fn new(conversation_id: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            module: module.into(),
        }
    }
}
