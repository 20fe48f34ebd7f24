//! Input classifier - decides whether a frame contains a new deliberate input
//!
//! Compares the current reading of a device against the previous frame and
//! against the baseline captured when the current action got focus.
//!
//! # Priority
//!
//! ```text
//! Buttons (rising edge) ──► Axes, ascending index:
//!                             a. hat mode: frame delta + sign
//!                             b. hat flick: frame delta onto a detent
//!                             c. analog: drift from baseline past 0.75
//! ```
//!
//! The frame delta catches self-centering sticks and multi-position hats, the
//! baseline delta catches throttles and sliders that move slowly from an
//! arbitrary resting point.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::controller::snapshot::{AxisDirection, Control, DeviceSnapshot, InputRef};

/// Hat mode: minimum frame-to-frame change.
pub const HAT_MODE_FRAME_DELTA: f32 = 0.25;
/// Hat mode: minimum distance from center.
pub const HAT_MODE_MIN_VALUE: f32 = 0.3;
/// Hat flick: minimum frame-to-frame change.
pub const FRAME_DELTA_THRESHOLD: f32 = 0.3;
/// Hat flick: the value has to sit past this on either side.
pub const HAT_THRESHOLD: f32 = 0.5;
/// Analog: minimum total movement from the baseline.
pub const TOTAL_MOVEMENT_THRESHOLD: f32 = 0.5;
/// Analog: the value has to sit past this on either side.
pub const AXIS_THRESHOLD: f32 = 0.75;
/// Width of the band around 0 and ±1 that counts as a discrete position.
pub const DISCRETE_TOLERANCE: f32 = 0.15;

/// True when the value rests near center or near either extreme.
pub fn is_near_discrete(value: f32) -> bool {
    let magnitude = value.abs();
    (magnitude - 1.0).abs() < DISCRETE_TOLERANCE || magnitude < DISCRETE_TOLERANCE
}

/// Classifies one frame of one device.
///
/// `baseline` may be absent or shorter than `current`; missing axes fall back
/// to the current value, i.e. zero total movement. Missing previous axes do
/// the same for the frame delta.
pub fn classify(
    current: &DeviceSnapshot,
    previous: &DeviceSnapshot,
    baseline: Option<&DeviceSnapshot>,
    hat_mode: bool,
) -> Option<Control> {
    for (index, &pressed) in current.buttons.iter().enumerate() {
        if pressed && !previous.button(index) {
            return Some(Control::Button(index));
        }
    }

    for (index, &value) in current.axes.iter().enumerate() {
        let previous_value = previous.axis(index).unwrap_or(value);
        let baseline_value = baseline.and_then(|b| b.axis(index)).unwrap_or(value);

        let frame_delta = (value - previous_value).abs();
        let total_movement = (value - baseline_value).abs();

        if hat_mode && frame_delta > HAT_MODE_FRAME_DELTA && value.abs() > HAT_MODE_MIN_VALUE {
            return Some(Control::Axis(index, AxisDirection::from_sign(value)));
        }

        let near_discrete = is_near_discrete(value);
        let at_extreme = value.abs() > HAT_THRESHOLD;

        if frame_delta > FRAME_DELTA_THRESHOLD && near_discrete && at_extreme {
            if value < -HAT_THRESHOLD {
                return Some(Control::Axis(index, AxisDirection::Negative));
            } else if value > HAT_THRESHOLD {
                return Some(Control::Axis(index, AxisDirection::Positive));
            }
        }

        if total_movement > TOTAL_MOVEMENT_THRESHOLD && !near_discrete {
            if value > AXIS_THRESHOLD {
                return Some(Control::Axis(index, AxisDirection::Positive));
            } else if value < -AXIS_THRESHOLD {
                return Some(Control::Axis(index, AxisDirection::Negative));
            }
        }
    }

    None
}

/// Per-device frame memory around [`classify`].
#[derive(Debug, Default, Clone)]
pub struct InputClassifier {
    previous: HashMap<usize, DeviceSnapshot>,
    baseline: HashMap<usize, DeviceSnapshot>,
}

impl InputClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one reading and returns a newly detected input, if any.
    ///
    /// The first reading of an unknown device only initializes its previous
    /// snapshot. The previous snapshot is replaced only when nothing fires, so
    /// the triggering edge is still visible on the next call.
    pub fn observe(
        &mut self,
        device: usize,
        current: &DeviceSnapshot,
        hat_mode: bool,
    ) -> Option<InputRef> {
        let Some(previous) = self.previous.get(&device) else {
            debug!("First reading of joystick{}, initializing", device);
            self.previous.insert(device, current.clone());
            return None;
        };

        match classify(current, previous, self.baseline.get(&device), hat_mode) {
            Some(control) => {
                let input = InputRef { device, control };
                info!("Detected input {}", input);
                Some(input)
            }
            None => {
                self.previous.insert(device, current.clone());
                None
            }
        }
    }

    /// Captures the given readings as both previous and baseline snapshots.
    pub fn reset_baseline<'a, I>(&mut self, readings: I)
    where
        I: IntoIterator<Item = (usize, &'a DeviceSnapshot)>,
    {
        for (device, snapshot) in readings {
            self.previous.insert(device, snapshot.clone());
            self.baseline.insert(device, snapshot.clone());
        }
    }

    /// Drops all per-device memory.
    pub fn forget_all(&mut self) {
        if !self.previous.is_empty() || !self.baseline.is_empty() {
            debug!("Forgetting snapshots of {} devices", self.previous.len());
        }
        self.previous.clear();
        self.baseline.clear();
    }

    pub fn baseline(&self, device: usize) -> Option<&DeviceSnapshot> {
        self.baseline.get(&device)
    }

    pub fn previous(&self, device: usize) -> Option<&DeviceSnapshot> {
        self.previous.get(&device)
    }
}
