//! # UI Common Components
//!
//! Shared pieces of the presentation layer: the intents panels emit, the
//! session view fed by the session's change channel, the status line and the
//! dark colour palette.
//!
//! Panels only read the [`BindingSession`](crate::binding::BindingSession)
//! and push [`UiIntent`]s; the app applies them after rendering, so no panel
//! ever mutates session state directly.

use egui::{Color32, Frame, Stroke};
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::binding::actions::ActionFilter;
use crate::binding::session::{NavDirection, SessionSnapshot};

const STATUS_LIFETIME: Duration = Duration::from_secs(6);

/// User requests collected while rendering one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    Start,
    Confirm,
    Skip,
    Clear,
    Navigate(NavDirection),
    JumpTo(usize),
    Resume,
    SetFilter(ActionFilter),
    SetHatMode(bool),
    Export,
    Import,
}

/// Latest published [`SessionSnapshot`], refreshed once per frame.
pub struct SessionView {
    receiver: watch::Receiver<SessionSnapshot>,
    snapshot: SessionSnapshot,
}

impl SessionView {
    pub fn new(receiver: watch::Receiver<SessionSnapshot>) -> Self {
        let snapshot = receiver.borrow().clone();
        Self { receiver, snapshot }
    }

    /// Takes over a newer snapshot if one was published. Returns whether
    /// anything changed.
    pub fn refresh(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.snapshot = self.receiver.borrow_and_update().clone();
                true
            }
            // Session gone, keep the last state
            Ok(false) | Err(_) => false,
        }
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Export needs a finished or idle session with at least one binding.
    pub fn can_export(&self) -> bool {
        !self.snapshot.phase.is_configuring() && self.snapshot.progress.configured > 0
    }

    pub fn resume_target(&self) -> Option<usize> {
        self.snapshot.resume_target
    }

    /// Keyboard hint for the status line while configuring.
    pub fn status_hint(&self) -> Option<&'static str> {
        if !self.snapshot.phase.is_configuring() {
            return None;
        }
        if self.snapshot.pending_input.is_some() {
            Some("Space confirms, Up/Down switch actions")
        } else if self.snapshot.resume_target.is_some() {
            Some("Move a control to bind it, or resume where you left off")
        } else {
            Some("Move a control to bind it, Up/Down switch actions")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown in the bottom panel until it expires.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    shown_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) > STATUS_LIFETIME
    }

    pub fn color(&self) -> Color32 {
        match self.kind {
            StatusKind::Info => UiColors::ACTIVE,
            StatusKind::Error => UiColors::INACTIVE,
        }
    }
}

/// Bordered frame used for list rows and panels.
pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(1.0, border_color))
        .fill(bg_color)
        .inner_margin(4)
        .outer_margin(2)
}

/// Dark theme palette.
pub struct UiColors;

impl UiColors {
    /// Nested components (RGB: 25, 25, 25)
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    /// List rows (RGB: 20, 20, 20)
    pub const EXTREME_BG: Color32 = Color32::from_rgb(20, 20, 20);

    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Focused action
    pub const HIGHLIGHT: Color32 = Color32::from_rgb(40, 110, 200);

    /// Bound actions, connected devices, info messages
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Unbound actions, errors
    pub const INACTIVE: Color32 = Color32::from_rgb(200, 50, 20);

    /// Staged input waiting for confirmation
    pub const PENDING: Color32 = Color32::from_rgb(230, 180, 30);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::actions::{Action, FilterPreset};
    use crate::binding::session::{BindingSession, SessionPhase};

    fn session() -> BindingSession {
        BindingSession::new(vec![
            Action::new("A", FilterPreset::Click),
            Action::new("B", FilterPreset::Click),
            Action::new("C", FilterPreset::Click),
        ])
    }

    #[test]
    fn view_follows_published_state() {
        let mut session = session();
        let mut view = SessionView::new(session.subscribe());
        assert!(!view.refresh());
        assert_eq!(view.snapshot().phase, SessionPhase::Idle);
        assert_eq!(view.status_hint(), None);

        session.start();
        assert!(view.refresh());
        assert_eq!(view.snapshot().current_action_index, Some(0));
        assert_eq!(
            view.status_hint(),
            Some("Move a control to bind it, Up/Down switch actions")
        );

        session.skip().unwrap();
        session.navigate_prev().unwrap();
        assert!(view.refresh());
        assert_eq!(view.resume_target(), Some(1));
        assert_eq!(
            view.status_hint(),
            Some("Move a control to bind it, or resume where you left off")
        );
    }

    #[test]
    fn export_enabled_by_import_and_disabled_while_configuring() {
        let mut session = session();
        let mut view = SessionView::new(session.subscribe());
        assert!(!view.can_export());

        session
            .import(r#"Action B { Input "joystick0:button4" }"#)
            .unwrap();
        assert!(view.refresh());
        assert!(view.can_export());

        session.start();
        view.refresh();
        assert!(!view.can_export());
    }

    #[test]
    fn view_keeps_last_state_after_session_is_dropped() {
        let mut session = session();
        let mut view = SessionView::new(session.subscribe());
        session.start();
        drop(session);

        assert!(!view.refresh());
        assert_eq!(view.snapshot().phase, SessionPhase::Idle);
    }
}
