//! Pure state transition function
//!
//! Given the same state, context, event and catalog, `transition` always
//! produces the same result. Timers, transcript storage and logging happen in
//! the runtime when it executes the returned effects.

use super::state::{PendingReply, ReplyKind, Submission};
use super::{Effect, Event, StrategyConfig, WizardContext, WizardState, WizardStep};
use crate::catalog::{CatalogOption, Domain, OptionCatalog, CUSTOM_TASK_ID, GOAL_GUIDE_ID, GOAL_SKIP_ID};
use crate::prompts::{self, PromptError};
use std::time::Duration;
use thiserror::Error;

/// Pause before the first question after the greeting
pub const WELCOME_DELAY: Duration = Duration::from_millis(800);
/// Simulated thinking before answering a submission
pub const THINKING_DELAY: Duration = Duration::from_millis(1200);
/// Pause before acknowledging a free-typed timeframe
pub const ACK_DELAY: Duration = Duration::from_millis(500);
/// Pause between the timeframe acknowledgement and the next question
pub const ACK_FOLLOW_UP_DELAY: Duration = Duration::from_millis(1000);

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: WizardState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: WizardState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Reasons a submission is rejected. The state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Conversation has not started yet")]
    NotStarted,
    #[error("Conversation already started")]
    AlreadyStarted,
    #[error("Assistant is still replying, wait for it to finish")]
    ReplyPending,
    #[error("Conversation is complete")]
    ConversationComplete,
    #[error("Empty input")]
    BlankInput,
    #[error("Option `{option_id}` is not offered at step {step}")]
    UnknownOption { step: WizardStep, option_id: String },
    #[error("Step {0} only accepts one of the listed options")]
    FreeTextNotAccepted(WizardStep),
}

/// Outcome of answering one step
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub config: StrategyConfig,
    pub next_step: WizardStep,
    pub prompt: String,
    pub options: Vec<CatalogOption>,
    pub custom_task_pending: bool,
}

impl Advance {
    /// Assistant messages for this advance: the prompt, then the option list
    /// when the next step has one
    pub fn messages(&self) -> Vec<Effect> {
        let mut effects = vec![Effect::assistant_text(self.prompt.clone())];
        if !self.options.is_empty() {
            effects.push(Effect::assistant_options(self.next_step, self.options.clone()));
        }
        effects
    }
}

/// Fixed successor of each step for an ordinary answer
fn next_step(step: WizardStep) -> WizardStep {
    match step {
        WizardStep::Init => WizardStep::Task,
        WizardStep::Task => WizardStep::Time,
        WizardStep::Time => WizardStep::Team,
        WizardStep::Team => WizardStep::Budget,
        WizardStep::Budget => WizardStep::Goal,
        WizardStep::Goal | WizardStep::GoalQna | WizardStep::Summary => WizardStep::Summary,
    }
}

fn domain_of(config: &StrategyConfig, context: Option<&WizardContext>) -> Domain {
    let module = config
        .module
        .as_deref()
        .or(context.map(|c| c.module.as_str()))
        .unwrap_or_default();
    Domain::classify(module)
}

/// Answer `step` with `submission`: store the value, then build the next
/// prompt and option list.
pub fn advance(
    step: WizardStep,
    submission: &Submission,
    config: &StrategyConfig,
    catalog: &dyn OptionCatalog,
) -> Result<Advance, PromptError> {
    if step.is_terminal() {
        return Err(PromptError::NoPrompt(step));
    }

    match (step, submission) {
        (WizardStep::Task, Submission::Option(id)) if id == CUSTOM_TASK_ID => {
            return Ok(Advance {
                config: config.clone(),
                next_step: WizardStep::Task,
                prompt: prompts::custom_task_prompt().to_string(),
                options: Vec::new(),
                custom_task_pending: true,
            });
        }
        (WizardStep::Goal, Submission::Option(id)) if id == GOAL_GUIDE_ID => {
            return build_advance(config.clone(), WizardStep::GoalQna, catalog);
        }
        (WizardStep::Goal, Submission::Option(id)) if id == GOAL_SKIP_ID => {
            return build_advance(config.clone(), WizardStep::Summary, catalog);
        }
        _ => {}
    }

    let mut config = config.clone();
    if let Some(field) = step.field() {
        if !config.set_once(field, submission.value()) {
            return Err(PromptError::AlreadyAnswered(field.name()));
        }
    }
    build_advance(config, next_step(step), catalog)
}

fn build_advance(
    config: StrategyConfig,
    next_step: WizardStep,
    catalog: &dyn OptionCatalog,
) -> Result<Advance, PromptError> {
    let prompt = prompts::prompt_for(next_step, &config, catalog)?;
    let options = catalog.options_for(next_step, domain_of(&config, None));
    Ok(Advance {
        config,
        next_step,
        prompt,
        options,
        custom_task_pending: false,
    })
}

/// Pure transition function
pub fn transition(
    state: &WizardState,
    context: &WizardContext,
    event: Event,
    catalog: &dyn OptionCatalog,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Start => {
            if state.step != WizardStep::Init || state.pending.is_some() {
                return Err(TransitionError::AlreadyStarted);
            }
            let kind = ReplyKind::Advance {
                answered: WizardStep::Init,
                submission: Submission::Text(context.module.clone()),
            };
            Ok(schedule(state, kind, WELCOME_DELAY, Effect::assistant_text(prompts::GREETING)))
        }

        Event::OptionSelected { option_id } => {
            check_accepting(state)?;
            let option = catalog
                .find(state.step, domain_of(&state.config, Some(context)), &option_id)
                .ok_or_else(|| TransitionError::UnknownOption {
                    step: state.step,
                    option_id: option_id.clone(),
                })?;
            let kind = ReplyKind::Advance {
                answered: state.step,
                submission: Submission::Option(option_id),
            };
            Ok(schedule(state, kind, THINKING_DELAY, Effect::user_text(option.label)))
        }

        Event::TextSubmitted { text } => {
            check_accepting(state)?;
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::BlankInput);
            }
            if !state.accepts_free_text() {
                return Err(TransitionError::FreeTextNotAccepted(state.step));
            }
            let submission = Submission::Text(text.to_string());
            let (kind, delay) = if state.step == WizardStep::Time {
                (ReplyKind::AcknowledgeTimeframe { submission }, ACK_DELAY)
            } else {
                let kind = ReplyKind::Advance {
                    answered: state.step,
                    submission,
                };
                (kind, THINKING_DELAY)
            };
            Ok(schedule(state, kind, delay, Effect::user_text(text)))
        }

        Event::ReplyDue { ticket } => {
            let Some(pending) = state.pending.as_ref().filter(|p| p.ticket == ticket) else {
                // Stale or cancelled timer
                return Ok(TransitionResult::new(state.clone()));
            };
            Ok(reply(state, pending.kind.clone(), catalog))
        }

        Event::Reset => {
            // The welcome reply is the only way out of INIT
            if state.step == WizardStep::Init {
                return Err(TransitionError::NotStarted);
            }
            let Some(pending) = &state.pending else {
                return Ok(TransitionResult::new(state.clone()));
            };
            let new_state = WizardState {
                pending: None,
                ..state.clone()
            };
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::CancelPendingReply {
                    ticket: pending.ticket,
                })
                .with_effect(Effect::SetTyping(false)))
        }
    }
}

fn check_accepting(state: &WizardState) -> Result<(), TransitionError> {
    if state.step.is_terminal() {
        Err(TransitionError::ConversationComplete)
    } else if state.step == WizardStep::Init {
        Err(TransitionError::NotStarted)
    } else if state.pending.is_some() {
        Err(TransitionError::ReplyPending)
    } else {
        Ok(())
    }
}

/// Record `first` (the visible reaction) and start typing towards `kind`
fn schedule(state: &WizardState, kind: ReplyKind, delay: Duration, first: Effect) -> TransitionResult {
    let ticket = state.next_ticket;
    let new_state = WizardState {
        pending: Some(PendingReply { ticket, delay, kind }),
        next_ticket: ticket + 1,
        ..state.clone()
    };
    TransitionResult::new(new_state)
        .with_effect(first)
        .with_effect(Effect::SetTyping(true))
        .with_effect(Effect::ScheduleReply { ticket, delay })
}

fn reply(state: &WizardState, kind: ReplyKind, catalog: &dyn OptionCatalog) -> TransitionResult {
    match kind {
        ReplyKind::AcknowledgeTimeframe { submission } => {
            match prompts::timeframe_ack(submission.value(), &state.config, catalog) {
                Ok(ack) => {
                    let follow_up = ReplyKind::Advance {
                        answered: WizardStep::Time,
                        submission,
                    };
                    let ticket = state.next_ticket;
                    let new_state = WizardState {
                        pending: Some(PendingReply {
                            ticket,
                            delay: ACK_FOLLOW_UP_DELAY,
                            kind: follow_up,
                        }),
                        next_ticket: ticket + 1,
                        ..state.clone()
                    };
                    TransitionResult::new(new_state)
                        .with_effect(Effect::assistant_text(ack))
                        .with_effect(Effect::ScheduleReply {
                            ticket,
                            delay: ACK_FOLLOW_UP_DELAY,
                        })
                }
                Err(e) => stall(state, &e),
            }
        }
        ReplyKind::Advance {
            answered,
            submission,
        } => match advance(answered, &submission, &state.config, catalog) {
            Ok(outcome) => {
                let new_state = WizardState {
                    step: outcome.next_step,
                    config: outcome.config.clone(),
                    custom_task_pending: outcome.custom_task_pending,
                    pending: None,
                    next_ticket: state.next_ticket,
                };
                let mut result = TransitionResult::new(new_state)
                    .with_effects(outcome.messages())
                    .with_effect(Effect::SetTyping(false));
                if outcome.next_step.is_terminal() {
                    result = result.with_effect(Effect::PlanReady {
                        config: outcome.config,
                    });
                }
                result
            }
            Err(e) => stall(state, &e),
        },
    }
}

/// Stay on the current step, stop typing and report why
fn stall(state: &WizardState, error: &PromptError) -> TransitionResult {
    let new_state = WizardState {
        pending: None,
        ..state.clone()
    };
    TransitionResult::new(new_state)
        .with_effect(Effect::SetTyping(false))
        .with_effect(Effect::ReportStall {
            step: state.step,
            reason: error.to_string(),
        })
}
