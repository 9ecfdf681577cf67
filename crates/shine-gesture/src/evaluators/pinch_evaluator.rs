use crate::{PinchEvent, TouchInput};

/// Classify the distance change of two fingers within a frame. It has no threshold and no state,
/// an event is produced on every frame with two fingers.
pub struct PinchEvaluator;

impl PinchEvaluator {
    pub fn evaluate(first: &TouchInput, second: &TouchInput) -> PinchEvent {
        let prev_span = first.previous_position() - second.previous_position();
        let current_span = second.position - first.position;

        // The two spans are subtracted in opposite order, only their lengths are comparable.
        // Intensity is the length of the raw difference of the spans, not |delta_movement|.
        let delta_movement = current_span.length() - prev_span.length();
        let intensity = (prev_span - current_span).length();

        PinchEvent {
            start_pos: first.position,
            end_pos: second.position,
            delta_movement,
            intensity,
        }
    }
}
