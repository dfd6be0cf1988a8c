//! Core wizard state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime owns the state, feeds events through [`transition`] and executes
//! the returned effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{ConfigField, StrategyConfig, WizardContext, WizardState, WizardStep};
pub use transition::{transition, TransitionError};
