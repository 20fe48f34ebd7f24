//! Binding subsystem - action table and the session that fills it.
//!
//! [`actions`] is the fixed configuration table, [`session`] the state machine
//! driven by sampler frames and user intents.

pub mod actions;
pub mod error;
pub mod session;

pub use actions::{
    default_actions, filtered_indices, format_action_name, Action, ActionDef, ActionFilter,
    FilterPreset, Progress, ACTION_TABLE,
};
pub use error::SessionError;
pub use session::{BindingSession, NavDirection, SessionPhase, SessionSnapshot, INPUT_COOLDOWN};
