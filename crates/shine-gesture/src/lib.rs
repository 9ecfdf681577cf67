//! Frame-driven classification of touch and tilt input into gestures.
//!
//! The host feeds one [`FrameInput`] per update into a [`GestureRecognizer`]. The recognizer keeps the
//! per-finger touch histories and the active tilt directions, runs the swipe, tap, pinch and tilt
//! evaluators and publishes the classified gestures on a [`GestureBus`].

mod gesture_error;
pub use self::gesture_error::*;
mod gesture_settings;
pub use self::gesture_settings::*;
mod frame_input;
pub use self::frame_input::*;
mod touch_history;
pub use self::touch_history::*;

pub mod event_bus;
mod gesture_events;
pub use self::gesture_events::*;
mod gesture_args;

pub mod evaluators;

mod gesture_recognizer;
pub use self::gesture_recognizer::*;
mod reaction_field;
pub use self::reaction_field::*;

mod gesture_plugin;
pub use self::gesture_plugin::*;
