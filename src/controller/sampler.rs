use gilrs::{Axis, Button, Event, EventType, Gamepad, Gilrs};
use statum::{machine, state};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, error, info, warn};

use crate::controller::snapshot::{ConnectedDevice, DeviceSnapshot};

/// Button order of the standard gamepad layout; position is the button index.
pub const BUTTON_LAYOUT: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// Axis order; sticks first, then throttles/sliders and the hat axes.
pub const AXIS_LAYOUT: [Axis; 8] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::LeftZ,
    Axis::RightZ,
    Axis::DPadX,
    Axis::DPadY,
];

// One device as seen by a source in a single tick
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceReading {
    pub device: ConnectedDevice,
    pub snapshot: DeviceSnapshot,
}

// Device plugged in or removed since the previous tick
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceChange {
    Connected(ConnectedDevice),
    Disconnected(ConnectedDevice),
}

/// Everything the sampler produced in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleFrame {
    pub readings: Vec<DeviceReading>,
    pub changes: Vec<DeviceChange>,
}

impl SampleFrame {
    /// No device was present in this tick
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

// Sampler errors
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("Failed to initialize input backend: {0}")]
    InitializationError(String),
}

/// Hardware enumeration. Must return immediately, also with no devices attached.
pub trait DeviceSource {
    fn read_devices(&mut self) -> Vec<DeviceReading>;
}

/// gilrs backed device source.
pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn new() -> Result<Self, SamplerError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(SamplerError::InitializationError(e.to_string()));
            }
        };
        Ok(Self { gilrs })
    }
}

impl DeviceSource for GilrsSource {
    fn read_devices(&mut self) -> Vec<DeviceReading> {
        // Draining the queue keeps gilrs' cached gamepad state current
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => debug!("gilrs reports gamepad {} connected", id),
                EventType::Disconnected => debug!("gilrs reports gamepad {} disconnected", id),
                _ => {}
            }
        }

        self.gilrs
            .gamepads()
            .map(|(id, gamepad)| DeviceReading {
                device: ConnectedDevice {
                    id: gamepad.name().to_string(),
                    index: usize::from(id),
                },
                snapshot: read_snapshot(&gamepad),
            })
            .collect()
    }
}

fn read_snapshot(gamepad: &Gamepad<'_>) -> DeviceSnapshot {
    DeviceSnapshot {
        buttons: BUTTON_LAYOUT.iter().map(|b| gamepad.is_pressed(*b)).collect(),
        axes: AXIS_LAYOUT
            .iter()
            .map(|a| gamepad.value(*a).clamp(-1.0, 1.0))
            .collect(),
    }
}

/// Replays prepared readings, one batch per tick. Once exhausted the last
/// batch repeats, like a controller nobody touches.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<DeviceReading>>,
    last: Vec<DeviceReading>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, readings: Vec<DeviceReading>) -> &mut Self {
        self.frames.push_back(readings);
        self
    }
}

impl DeviceSource for ScriptedSource {
    fn read_devices(&mut self) -> Vec<DeviceReading> {
        if let Some(next) = self.frames.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum SamplerState {
    Initializing,
    Sampling,
}

#[machine]
pub struct DeviceSampler<S: SamplerState> {
    // Hardware enumeration
    source: Box<dyn DeviceSource>,

    // Devices present in the previous tick
    connected: BTreeMap<usize, ConnectedDevice>,
}

impl<S: SamplerState> DeviceSampler<S> {
    pub fn connected_devices(&self) -> Vec<ConnectedDevice> {
        self.connected.values().cloned().collect()
    }
}

impl DeviceSampler<Initializing> {
    pub fn create(source: Box<dyn DeviceSource>) -> Self {
        debug!("Creating device sampler");
        Self::new(source, BTreeMap::new())
    }

    pub fn with_gilrs() -> Result<Self, SamplerError> {
        Ok(Self::create(Box::new(GilrsSource::new()?)))
    }

    /// Starts sampling. Devices present at this point are reported as
    /// connected by the first poll.
    pub fn initialize(self) -> DeviceSampler<Sampling> {
        info!("Device sampler initialized, transitioning to Sampling state");
        self.transition()
    }
}

impl DeviceSampler<Sampling> {
    /// Reads every connected device once and diffs the device set against
    /// the previous tick.
    pub fn poll(&mut self) -> SampleFrame {
        let readings = self.source.read_devices();
        let mut changes = Vec::new();

        let mut current = BTreeMap::new();
        for reading in &readings {
            current.insert(reading.device.index, reading.device.clone());
        }

        for (index, device) in &current {
            if self.connected.get(index) != Some(device) {
                info!("Joystick {} connected: {}", device.index, device.id);
                changes.push(DeviceChange::Connected(device.clone()));
            }
        }
        for (index, device) in &self.connected {
            if !current.contains_key(index) {
                warn!("Joystick {} disconnected: {}", device.index, device.id);
                changes.push(DeviceChange::Disconnected(device.clone()));
            }
        }

        if current.is_empty() && !self.connected.is_empty() {
            info!("No joysticks detected");
        }

        self.connected = current;
        SampleFrame { readings, changes }
    }
}
