//! Controller subsystem - turns raw gamepad readings into detected inputs
//!
//! Two stages run back to back inside every tick:
//!
//! 1. [`sampler`] - snapshots every connected device and tracks plug/unplug
//! 2. [`classifier`] - compares snapshots and reports at most one new input
//!
//! # Architecture
//!
//! ```text
//! gilrs ──► DeviceSampler ──► SampleFrame ──► InputClassifier ──► InputRef
//!           (snapshots)                       (per device memory)
//! ```
//!
//! [`snapshot`] holds the shared data types.

pub mod classifier;
pub mod sampler;
pub mod snapshot;

pub use classifier::{classify, InputClassifier};
pub use sampler::{
    DeviceChange, DeviceReading, DeviceSampler, DeviceSource, GilrsSource, SampleFrame,
    SamplerError, ScriptedSource,
};
pub use snapshot::{
    describe_input, AxisDirection, ConnectedDevice, Control, DeviceSnapshot, InputRef,
    InputRefError,
};
