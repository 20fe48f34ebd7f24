//! Text format of the game's custom input config.
//!
//! [`encode`] renders bound actions as nested `ActionManager` blocks, [`decode`]
//! pulls the first `Input "<ref>"` of every `Action` block back out. Export and
//! import of the same table give back the same bindings.

pub mod decode;
pub mod encode;
pub mod error;
pub mod guid;

pub use decode::{decode, DecodeReport};
pub use encode::{encode, InputFilter, INFINITE_HOLD_DURATION};
pub use error::CodecError;
pub use guid::{GuidSource, RandomGuids, SequentialGuids};
