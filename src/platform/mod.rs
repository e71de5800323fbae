//! Platform collaborators
//!
//! The simulation never polls devices itself. Hosts hand it:
//! - an input snapshot taken at frame start (`input`)
//! - an event bus for cross-cutting signals such as quit requests (`events`)

pub mod events;
pub mod input;

pub use events::{EventBus, QUIT_TOPIC};
pub use input::{Button, GamepadState, InputSource, InputState, Key, StickState};
