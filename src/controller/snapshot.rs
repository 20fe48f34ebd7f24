//! Raw per-frame device readings and the canonical identity of a physical control.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Instantaneous reading of one device, captured once per tick.
///
/// Index order matters: the classifier walks buttons and axes in ascending
/// index and the first match wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f32>,
}

impl DeviceSnapshot {
    pub fn new(buttons: Vec<bool>, axes: Vec<f32>) -> Self {
        Self { buttons, axes }
    }

    /// Missing buttons read as released.
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }
}

/// A currently plugged device as reported by the hardware enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedDevice {
    pub id: String,
    pub index: usize,
}

// Axis direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    Positive,
    Negative,
}

impl AxisDirection {
    /// Direction by sign, zero counts as negative.
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            AxisDirection::Positive
        } else {
            AxisDirection::Negative
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            AxisDirection::Positive => '+',
            AxisDirection::Negative => '-',
        }
    }
}

/// Physical control on a device. Buttons carry no direction, axes always do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Button(usize),
    Axis(usize, AxisDirection),
}

/// Canonical identity of one physical control position, rendered as
/// `joystick<device>:button<idx>` or `joystick<device>:axis<idx><+|->`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputRef {
    pub device: usize,
    pub control: Control,
}

impl InputRef {
    pub fn button(device: usize, index: usize) -> Self {
        Self {
            device,
            control: Control::Button(index),
        }
    }

    pub fn axis(device: usize, index: usize, direction: AxisDirection) -> Self {
        Self {
            device,
            control: Control::Axis(index, direction),
        }
    }
}

impl fmt::Display for InputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Control::Button(index) => write!(f, "joystick{}:button{}", self.device, index),
            Control::Axis(index, direction) => write!(
                f,
                "joystick{}:axis{}{}",
                self.device,
                index,
                direction.symbol()
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputRefError {
    #[error("Input reference must start with 'joystick<n>:': {0}")]
    MissingDevice(String),

    #[error("Unknown control kind in input reference: {0}")]
    UnknownControl(String),

    #[error("Invalid index in input reference: {0}")]
    InvalidIndex(String),

    #[error("Axis reference needs a '+' or '-' direction: {0}")]
    MissingDirection(String),
}

impl FromStr for InputRef {
    type Err = InputRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("joystick")
            .ok_or_else(|| InputRefError::MissingDevice(s.to_string()))?;
        let (device, control) = rest
            .split_once(':')
            .ok_or_else(|| InputRefError::MissingDevice(s.to_string()))?;
        let device = parse_index(device, s)?;

        if let Some(index) = control.strip_prefix("button") {
            return Ok(InputRef::button(device, parse_index(index, s)?));
        }

        if let Some(axis) = control.strip_prefix("axis") {
            let direction = match axis.chars().last() {
                Some('+') => AxisDirection::Positive,
                Some('-') => AxisDirection::Negative,
                _ => return Err(InputRefError::MissingDirection(s.to_string())),
            };
            let index = parse_index(&axis[..axis.len() - 1], s)?;
            return Ok(InputRef::axis(device, index, direction));
        }

        Err(InputRefError::UnknownControl(s.to_string()))
    }
}

fn parse_index(digits: &str, whole: &str) -> Result<usize, InputRefError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputRefError::InvalidIndex(whole.to_string()));
    }
    digits
        .parse()
        .map_err(|_| InputRefError::InvalidIndex(whole.to_string()))
}

/// Human readable description shown as a hint next to a detected input.
pub fn describe_input(input: &InputRef) -> String {
    match input.control {
        Control::Button(index) => format!("Joystick {}, Button {}", input.device, index),
        Control::Axis(index, direction) => {
            let (name, hint) = match direction {
                AxisDirection::Positive => ("positive", "push/right"),
                AxisDirection::Negative => ("negative", "pull/left"),
            };
            format!(
                "Joystick {}, Axis {} {} ({})",
                input.device, index, name, hint
            )
        }
    }
}
