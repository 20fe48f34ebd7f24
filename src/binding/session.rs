//! Binding session - walks the user through the action table
//!
//! # State Machine
//!
//! ```text
//!            start()
//! Idle ──────────────► AwaitingInput ◄──────────────┐
//!  ▲                     │       ▲                  │ cooldown expired,
//!  │               input │       │ skip/clear/      │ next unbound action
//!  │            detected │       │ navigate         │
//!  │                     ▼       │                  │
//!  │              PendingConfirmation ── confirm() ─┘
//!  │                                                │ no unbound action left
//!  └──────────── start() ──── Finished ◄────────────┘
//! ```
//!
//! Time never advances on its own: every time-dependent call takes `now`,
//! and the cooldown plus the deferred advance after `confirm()` are plain
//! timestamps checked at the top of [`BindingSession::tick`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::binding::actions::{default_actions, Action, ActionFilter, Progress};
use crate::binding::error::SessionError;
use crate::codec::{self, CodecError, DecodeReport, GuidSource};
use crate::controller::classifier::InputClassifier;
use crate::controller::sampler::SampleFrame;
use crate::controller::snapshot::{DeviceSnapshot, InputRef};

/// Window after a detection or confirmation in which detections are ignored.
pub const INPUT_COOLDOWN: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingInput,
    PendingConfirmation,
    Finished,
}

impl SessionPhase {
    pub fn is_configuring(&self) -> bool {
        matches!(
            self,
            SessionPhase::AwaitingInput | SessionPhase::PendingConfirmation
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// Read-only view published after every state change.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_action_index: Option<usize>,
    pub furthest_action_index: usize,
    pub pending_input: Option<InputRef>,
    pub progress: Progress,
    pub resume_target: Option<usize>,
}

pub struct BindingSession {
    actions: Vec<Action>,
    phase: SessionPhase,
    current_action_index: usize,
    furthest_action_index: usize,
    pending_input: Option<InputRef>,
    cooldown_until: Option<Instant>,
    // Deferred advance scheduled by confirm()
    advance_at: Option<Instant>,
    hat_mode: bool,
    classifier: InputClassifier,
    // Most recent reading per device, used for baseline resets
    latest: BTreeMap<usize, DeviceSnapshot>,
    state_sender: watch::Sender<SessionSnapshot>,
}

impl BindingSession {
    pub fn new(actions: Vec<Action>) -> Self {
        let (state_sender, _) = watch::channel(SessionSnapshot {
            phase: SessionPhase::Idle,
            current_action_index: None,
            furthest_action_index: 0,
            pending_input: None,
            progress: Progress::of(&actions),
            resume_target: None,
        });

        Self {
            actions,
            phase: SessionPhase::Idle,
            current_action_index: 0,
            furthest_action_index: 0,
            pending_input: None,
            cooldown_until: None,
            advance_at: None,
            hat_mode: false,
            classifier: InputClassifier::new(),
            latest: BTreeMap::new(),
            state_sender,
        }
    }

    pub fn with_default_actions() -> Self {
        Self::new(default_actions())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_configuring(&self) -> bool {
        self.phase.is_configuring()
    }

    /// Focused action; only while configuring.
    pub fn current_action_index(&self) -> Option<usize> {
        self.is_configuring().then_some(self.current_action_index)
    }

    pub fn current_action(&self) -> Option<&Action> {
        self.current_action_index().and_then(|i| self.actions.get(i))
    }

    /// A confirmation is applied but the session has not moved on yet.
    pub fn is_transition_pending(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn furthest_action_index(&self) -> usize {
        self.furthest_action_index
    }

    pub fn pending_input(&self) -> Option<InputRef> {
        self.pending_input
    }

    pub fn hat_mode(&self) -> bool {
        self.hat_mode
    }

    pub fn set_hat_mode(&mut self, enabled: bool) {
        if self.hat_mode != enabled {
            debug!("Hat mode {}", if enabled { "enabled" } else { "disabled" });
            self.hat_mode = enabled;
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::of(&self.actions)
    }

    pub fn filtered_indices(&self, filter: ActionFilter) -> Vec<usize> {
        crate::binding::actions::filtered_indices(&self.actions, filter)
    }

    /// Where `resume()` would go, offered only after navigating back behind
    /// the furthest action reached.
    pub fn resume_target(&self) -> Option<usize> {
        if !self.is_configuring() || self.current_action_index >= self.furthest_action_index {
            return None;
        }
        self.first_unbound_from(self.furthest_action_index)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            current_action_index: self.current_action_index(),
            furthest_action_index: self.furthest_action_index,
            pending_input: self.pending_input,
            progress: self.progress(),
            resume_target: self.resume_target(),
        }
    }

    /// Change notifications; the receiver always holds the latest snapshot.
    /// The UI reads it through [`SessionView`](crate::ui::SessionView).
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_sender.subscribe()
    }

    pub fn start(&mut self) {
        info!("Starting configuration of {} actions", self.actions.len());
        if self.actions.is_empty() {
            self.phase = SessionPhase::Finished;
            self.publish();
            return;
        }
        self.phase = SessionPhase::AwaitingInput;
        self.current_action_index = 0;
        self.furthest_action_index = 0;
        self.pending_input = None;
        self.cooldown_until = None;
        self.advance_at = None;
        self.classifier.forget_all();
        self.reset_baseline();
        self.publish();
    }

    /// Consumes one sampler frame. Returns the input staged in this tick.
    pub fn tick(&mut self, frame: &SampleFrame, now: Instant) -> Option<InputRef> {
        self.latest = frame
            .readings
            .iter()
            .map(|r| (r.device.index, r.snapshot.clone()))
            .collect();
        if frame.is_empty() {
            self.classifier.forget_all();
        }

        if let Some(at) = self.advance_at {
            if now < at {
                return None;
            }
            self.advance_at = None;
            self.cooldown_until = None;
            self.reset_baseline();
            self.advance();
        }

        if !self.is_configuring() {
            return None;
        }

        if let Some(until) = self.cooldown_until {
            if now < until {
                return None;
            }
            self.cooldown_until = None;
        }

        let hat_mode = self.hat_mode;
        let detected = frame
            .readings
            .iter()
            .find_map(|r| self.classifier.observe(r.device.index, &r.snapshot, hat_mode))?;

        self.stage(detected, now);
        Some(detected)
    }

    fn stage(&mut self, input: InputRef, now: Instant) {
        if let Some(replaced) = self.pending_input.replace(input) {
            debug!("Replacing staged input {} with {}", replaced, input);
        }
        self.phase = SessionPhase::PendingConfirmation;
        self.cooldown_until = Some(now + INPUT_COOLDOWN);
        debug!(
            "Staged {} for {}, waiting for confirmation",
            input, self.actions[self.current_action_index].name
        );
        self.publish();
    }

    /// Commits the staged input to the focused action. The session moves on
    /// once the cooldown has passed.
    pub fn confirm(&mut self, now: Instant) -> Result<(), SessionError> {
        self.guard_transition()?;
        let Some(input) = self.pending_input.take() else {
            return Err(SessionError::NoPendingInput);
        };

        let action = &mut self.actions[self.current_action_index];
        info!("Bound {} to {}", input, action.name);
        action.binding = Some(input.into());

        self.phase = SessionPhase::AwaitingInput;
        self.cooldown_until = Some(now + INPUT_COOLDOWN);
        self.advance_at = Some(now + INPUT_COOLDOWN);
        self.publish();
        Ok(())
    }

    /// Moves on without writing a binding.
    pub fn skip(&mut self) -> Result<(), SessionError> {
        self.guard_transition()?;
        if !self.is_configuring() {
            debug!("Skip ignored, not configuring");
            return Ok(());
        }
        debug!("Skipping {}", self.actions[self.current_action_index].name);
        self.cooldown_until = None;
        self.pending_input = None;
        self.reset_baseline();
        self.advance();
        Ok(())
    }

    /// Removes the focused action's binding and stays on it.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.guard_transition()?;
        if !self.is_configuring() {
            debug!("Clear ignored, not configuring");
            return Ok(());
        }
        let action = &mut self.actions[self.current_action_index];
        debug!("Clearing binding of {}", action.name);
        action.binding = None;
        self.pending_input = None;
        self.cooldown_until = None;
        self.phase = SessionPhase::AwaitingInput;
        self.reset_baseline();
        self.publish();
        Ok(())
    }

    pub fn navigate(&mut self, direction: NavDirection) -> Result<(), SessionError> {
        match direction {
            NavDirection::Previous => self.navigate_prev(),
            NavDirection::Next => self.navigate_next(),
        }
    }

    pub fn navigate_prev(&mut self) -> Result<(), SessionError> {
        self.jump_to(self.current_action_index.saturating_sub(1))
    }

    pub fn navigate_next(&mut self) -> Result<(), SessionError> {
        self.jump_to(self.current_action_index.saturating_add(1))
    }

    /// Focuses `index`, clamped to the table.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.guard_transition()?;
        if !self.is_configuring() {
            debug!("Navigation ignored, not configuring");
            return Ok(());
        }
        let index = index.min(self.actions.len() - 1);
        self.pending_input = None;
        self.phase = SessionPhase::AwaitingInput;
        self.reset_baseline();
        self.focus(index);
        self.publish();
        Ok(())
    }

    /// Jumps to the first unbound action at or after the furthest one reached.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.guard_transition()?;
        match self.first_unbound_from(self.furthest_action_index) {
            Some(index) => self.jump_to(index),
            None => {
                debug!("Nothing left to resume");
                Ok(())
            }
        }
    }

    /// Replaces all bindings with the ones found in `text`. On error the
    /// bindings stay untouched.
    pub fn import(&mut self, text: &str) -> Result<DecodeReport, CodecError> {
        let report = codec::decode(text, &mut self.actions)?;
        info!(
            "Imported {} bindings ({} unknown actions ignored, {} kept as text)",
            report.bound,
            report.unknown.len(),
            report.foreign.len()
        );
        self.publish();
        Ok(report)
    }

    pub fn export(&self, guids: &mut dyn GuidSource) -> String {
        codec::encode(&self.actions, guids)
    }

    fn guard_transition(&self) -> Result<(), SessionError> {
        if self.advance_at.is_some() {
            debug!("Intent rejected, confirmation still pending");
            return Err(SessionError::TransitionPending);
        }
        Ok(())
    }

    fn first_unbound_from(&self, start: usize) -> Option<usize> {
        (start..self.actions.len()).find(|&i| !self.actions[i].is_bound())
    }

    fn focus(&mut self, index: usize) {
        self.current_action_index = index;
        self.furthest_action_index = self.furthest_action_index.max(index);
        debug!(
            "Focused action {} ({})",
            index, self.actions[index].name
        );
    }

    // Next unbound action after the current one, or Finished
    fn advance(&mut self) {
        self.pending_input = None;
        match self.first_unbound_from(self.current_action_index + 1) {
            Some(index) => {
                self.phase = SessionPhase::AwaitingInput;
                self.focus(index);
            }
            None => {
                info!("All actions visited, configuration finished");
                self.phase = SessionPhase::Finished;
            }
        }
        self.publish();
    }

    fn reset_baseline(&mut self) {
        self.classifier
            .reset_baseline(self.latest.iter().map(|(device, snapshot)| (*device, snapshot)));
    }

    fn publish(&self) {
        self.state_sender.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::actions::FilterPreset;
    use crate::controller::sampler::DeviceReading;
    use crate::controller::snapshot::{AxisDirection, ConnectedDevice};

    fn two_actions() -> Vec<Action> {
        vec![
            Action::new("A", FilterPreset::Hold),
            Action::new("B", FilterPreset::Click),
        ]
    }

    fn frame(buttons: &[bool], axes: &[f32]) -> SampleFrame {
        frame_for(0, buttons, axes)
    }

    fn frame_for(device: usize, buttons: &[bool], axes: &[f32]) -> SampleFrame {
        SampleFrame {
            readings: vec![DeviceReading {
                device: ConnectedDevice {
                    id: "Test Stick".to_string(),
                    index: device,
                },
                snapshot: DeviceSnapshot::new(buttons.to_vec(), axes.to_vec()),
            }],
            changes: Vec::new(),
        }
    }

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    fn started(actions: Vec<Action>, t0: Instant) -> BindingSession {
        let mut session = BindingSession::new(actions);
        session.tick(&frame(&[false, false], &[0.0, 0.0]), t0);
        session.start();
        session
    }

    #[test]
    fn button_press_confirm_and_advance() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);

        let staged = session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        assert_eq!(staged, Some(InputRef::button(0, 0)));
        assert_eq!(session.phase(), SessionPhase::PendingConfirmation);

        session.confirm(ms(t0, 50)).unwrap();
        assert_eq!(
            session.actions()[0].binding.as_ref().map(|b| b.to_string()),
            Some("joystick0:button0".to_string())
        );
        // Still on A until the cooldown is over.
        assert_eq!(session.current_action_index(), Some(0));

        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 200));
        assert_eq!(session.current_action_index(), Some(0));

        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 350));
        assert_eq!(session.current_action_index(), Some(1));
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.pending_input(), None);
    }

    #[test]
    fn held_button_does_not_retrigger_after_advance() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        session.confirm(ms(t0, 20)).unwrap();

        // Baseline reset captures the held button.
        assert_eq!(session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 400)), None);
        assert_eq!(session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 416)), None);
        assert_eq!(
            session.tick(&frame(&[true, true], &[0.0, 0.0]), ms(t0, 432)),
            Some(InputRef::button(0, 1))
        );
    }

    #[test]
    fn second_emission_inside_cooldown_is_ignored() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);

        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        assert_eq!(
            session.tick(&frame(&[true, true], &[0.0, 0.0]), ms(t0, 100)),
            None
        );
        assert_eq!(session.pending_input(), Some(InputRef::button(0, 0)));
    }

    #[test]
    fn new_detection_after_cooldown_replaces_staged_input() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);

        session.tick(&frame(&[false, false], &[0.0, 0.0]), ms(t0, 8));
        session.tick(&frame(&[false, false], &[0.0, 1.0]), ms(t0, 16));
        assert_eq!(
            session.pending_input(),
            Some(InputRef::axis(0, 1, AxisDirection::Positive))
        );
        // Out of cooldown, the button edge outranks the axis edge that is still visible.
        session.tick(&frame(&[true, false], &[0.0, 1.0]), ms(t0, 320));
        assert_eq!(session.pending_input(), Some(InputRef::button(0, 0)));
    }

    #[test]
    fn only_first_device_to_fire_counts() {
        let t0 = Instant::now();
        let mut session = BindingSession::new(two_actions());
        let both = |a: bool, b: bool| SampleFrame {
            readings: vec![
                frame_for(0, &[a], &[]).readings.remove(0),
                frame_for(3, &[b], &[]).readings.remove(0),
            ],
            changes: Vec::new(),
        };
        session.tick(&both(false, false), t0);
        session.start();
        assert_eq!(
            session.tick(&both(true, true), ms(t0, 16)),
            Some(InputRef::button(0, 0))
        );
    }

    #[test]
    fn hat_mode_detects_small_flicks() {
        let t0 = Instant::now();
        let mut session = BindingSession::new(two_actions());
        session.set_hat_mode(true);
        session.tick(&frame(&[], &[0.0, 0.0, 0.0, 0.0]), t0);
        session.start();
        assert_eq!(
            session.tick(&frame(&[], &[0.0, 0.0, 0.0, 0.9]), ms(t0, 16)),
            Some(InputRef::axis(0, 3, AxisDirection::Positive))
        );
    }

    #[test]
    fn parked_throttle_is_not_detected_for_next_action() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);

        // Throttle pushed slowly to 0.9 and bound.
        for (i, v) in [0.2, 0.4, 0.6, 0.8].iter().enumerate() {
            session.tick(&frame(&[false, false], &[*v, 0.0]), ms(t0, 16 * (i as u64 + 1)));
        }
        assert_eq!(
            session.pending_input(),
            Some(InputRef::axis(0, 0, AxisDirection::Positive))
        );
        session.confirm(ms(t0, 100)).unwrap();
        session.tick(&frame(&[false, false], &[0.8, 0.0]), ms(t0, 500));
        assert_eq!(session.current_action_index(), Some(1));

        // Left parked: no drift from the new baseline.
        for i in 0..10 {
            assert_eq!(
                session.tick(&frame(&[false, false], &[0.8, 0.0]), ms(t0, 520 + i * 16)),
                None
            );
        }
    }

    #[test]
    fn confirm_without_pending_is_rejected() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        assert_eq!(session.confirm(t0), Err(SessionError::NoPendingInput));
    }

    #[test]
    fn intents_wait_for_deferred_advance() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        session.confirm(ms(t0, 20)).unwrap();

        assert_eq!(session.skip(), Err(SessionError::TransitionPending));
        assert_eq!(session.navigate_next(), Err(SessionError::TransitionPending));
        assert_eq!(session.clear(), Err(SessionError::TransitionPending));
        assert_eq!(session.current_action_index(), Some(0));
    }

    #[test]
    fn confirming_last_unbound_action_finishes() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.skip().unwrap();
        assert_eq!(session.current_action_index(), Some(1));

        session.tick(&frame(&[false, true], &[0.0, 0.0]), ms(t0, 16));
        session.confirm(ms(t0, 20)).unwrap();
        session.tick(&frame(&[false, true], &[0.0, 0.0]), ms(t0, 400));
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.current_action_index(), None);
    }

    #[test]
    fn skip_past_the_end_is_idempotent() {
        let mut session = started(two_actions(), Instant::now());
        for _ in 0..5 {
            session.skip().unwrap();
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert!(session.actions().iter().all(|a| a.binding.is_none()));
    }

    #[test]
    fn navigate_next_clamps_at_last_action() {
        let mut session = started(two_actions(), Instant::now());
        for _ in 0..5 {
            session.navigate_next().unwrap();
        }
        assert_eq!(session.current_action_index(), Some(1));
        assert_eq!(session.furthest_action_index(), 1);

        for _ in 0..5 {
            session.navigate(NavDirection::Previous).unwrap();
        }
        assert_eq!(session.current_action_index(), Some(0));
        assert_eq!(session.furthest_action_index(), 1);
    }

    #[test]
    fn skip_lands_on_next_unbound_action() {
        let mut actions = crate::binding::actions::default_actions();
        actions[1].binding = Some(InputRef::button(0, 9).into());
        actions[2].binding = Some(InputRef::button(0, 8).into());
        let mut session = started(actions, Instant::now());

        session.skip().unwrap();
        assert_eq!(session.current_action_index(), Some(3));
    }

    #[test]
    fn jump_clamps_and_tracks_furthest() {
        let mut session =
            started(crate::binding::actions::default_actions(), Instant::now());
        session.jump_to(500).unwrap();
        assert_eq!(session.current_action_index(), Some(39));
        session.jump_to(2).unwrap();
        assert_eq!(session.furthest_action_index(), 39);
    }

    #[test]
    fn resume_goes_to_first_unbound_from_furthest() {
        let mut actions = crate::binding::actions::default_actions();
        actions[5].binding = Some(InputRef::button(0, 1).into());
        let mut session = started(actions, Instant::now());

        session.jump_to(5).unwrap();
        session.jump_to(1).unwrap();
        assert_eq!(session.resume_target(), Some(6));
        session.resume().unwrap();
        assert_eq!(session.current_action_index(), Some(6));
        assert_eq!(session.resume_target(), None);
    }

    #[test]
    fn clear_unbinds_and_stays() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        session.confirm(ms(t0, 20)).unwrap();
        session.tick(&frame(&[false, false], &[0.0, 0.0]), ms(t0, 400));
        session.navigate_prev().unwrap();
        assert_eq!(session.current_action_index(), Some(0));

        session.clear().unwrap();
        assert_eq!(session.actions()[0].binding, None);
        assert_eq!(session.current_action_index(), Some(0));
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
    }

    #[test]
    fn navigation_drops_pending_input() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 16));
        session.navigate_next().unwrap();
        assert_eq!(session.pending_input(), None);
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.actions()[0].binding, None);
    }

    #[test]
    fn idle_session_ignores_input_and_intents() {
        let t0 = Instant::now();
        let mut session = BindingSession::new(two_actions());
        session.tick(&frame(&[false], &[]), t0);
        assert_eq!(session.tick(&frame(&[true], &[]), ms(t0, 16)), None);
        assert_eq!(session.skip(), Ok(()));
        assert_eq!(session.navigate_next(), Ok(()));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn unplugging_everything_forgets_devices() {
        let t0 = Instant::now();
        let mut session = started(two_actions(), t0);
        session.tick(&SampleFrame::default(), ms(t0, 16));
        // Replugged with the button already held: first reading only initializes.
        assert_eq!(session.tick(&frame(&[true, false], &[0.0, 0.0]), ms(t0, 32)), None);
    }

    #[test]
    fn publishes_snapshots_on_change() {
        let t0 = Instant::now();
        let mut session = BindingSession::new(two_actions());
        let mut receiver = session.subscribe();
        session.tick(&frame(&[false], &[]), t0);
        session.start();

        assert!(receiver.has_changed().unwrap());
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.phase, SessionPhase::AwaitingInput);
        assert_eq!(snapshot.current_action_index, Some(0));

        session.tick(&frame(&[true], &[]), ms(t0, 16));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(
            receiver.borrow_and_update().pending_input,
            Some(InputRef::button(0, 0))
        );
    }

    #[test]
    fn restart_after_finish() {
        let mut session = started(two_actions(), Instant::now());
        session.skip().unwrap();
        session.skip().unwrap();
        assert_eq!(session.phase(), SessionPhase::Finished);
        session.start();
        assert_eq!(session.current_action_index(), Some(0));
        assert_eq!(session.furthest_action_index(), 0);
    }
}
