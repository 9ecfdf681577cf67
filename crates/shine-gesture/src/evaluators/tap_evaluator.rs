use crate::{GestureSettings, TapEvent, TouchHistory};

/// Classify short touches by their duration.
#[derive(Debug, Clone)]
pub struct TapEvaluator {
    min_duration: f32,
    max_duration: f32,
}

impl TapEvaluator {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            min_duration: settings.min_tap_duration,
            max_duration: settings.max_tap_duration,
        }
    }

    /// Evaluate the trace of a lifted finger. The tap is located at the last known position.
    pub fn evaluate(&self, history: &TouchHistory) -> Option<TapEvent> {
        let duration = history.duration();
        if duration > self.min_duration && duration < self.max_duration {
            Some(TapEvent {
                position: history.last().position,
            })
        } else {
            None
        }
    }
}
