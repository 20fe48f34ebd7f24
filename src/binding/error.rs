use thiserror::Error;

/// Rejected user intents. None of them change session state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `confirm()` without a staged input
    #[error("No detected input waiting for confirmation")]
    NoPendingInput,

    /// An intent arrived while the post-confirm advance was still scheduled
    #[error("Previous confirmation is still being applied")]
    TransitionPending,
}
