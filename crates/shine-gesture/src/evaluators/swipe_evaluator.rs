use crate::{GestureSettings, SwipeDirection, SwipeEvent, TouchHistory};
use bevy::math::Vec2;

impl SwipeDirection {
    /// Classify a movement by its dominant axis. Ties (and NaN) yield `None`.
    pub fn classify(vector: Vec2) -> Self {
        let (dx, dy) = (vector.x.abs(), vector.y.abs());
        if dx > dy {
            if vector.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dx < dy {
            if vector.y > 0.0 {
                SwipeDirection::Up
            } else {
                SwipeDirection::Down
            }
        } else {
            SwipeDirection::None
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, SwipeDirection::Up | SwipeDirection::Down)
    }
}

impl SwipeEvent {
    pub fn new(start_pos: Vec2, end_pos: Vec2) -> Self {
        let vector = end_pos - start_pos;
        Self {
            start_pos,
            end_pos,
            vector,
            intensity: vector.length(),
            direction: SwipeDirection::classify(vector),
        }
    }
}

/// Classify linear touch movements.
#[derive(Debug, Clone)]
pub struct SwipeEvaluator {
    /// Minimal horizontal length as a fraction of the screen width.
    min_width_fraction: f32,
    /// Minimal vertical length as a fraction of the screen height.
    min_height_fraction: f32,
}

impl SwipeEvaluator {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            min_width_fraction: settings.min_horizontal_swipe_length / 100.0,
            min_height_fraction: settings.min_vertical_swipe_length / 100.0,
        }
    }

    /// Movement of a finger that is still down, built from its last two positions.
    /// No threshold is applied.
    pub fn evaluate_ongoing(position: Vec2, delta: Vec2) -> SwipeEvent {
        SwipeEvent::new(position - delta, position)
    }

    /// Evaluate the trace of a lifted finger. Only the first and last samples are considered.
    pub fn evaluate_completed(&self, history: &TouchHistory, screen_size: Vec2) -> Option<SwipeEvent> {
        if history.len() < 2 {
            return None;
        }

        let swipe = SwipeEvent::new(history.first().position, history.last().position);
        if self.is_valid(&swipe, screen_size) {
            Some(swipe)
        } else {
            None
        }
    }

    fn is_valid(&self, swipe: &SwipeEvent, screen_size: Vec2) -> bool {
        let (screen_length, min_fraction) = if swipe.direction.is_horizontal() {
            (screen_size.x, self.min_width_fraction)
        } else if swipe.direction.is_vertical() {
            (screen_size.y, self.min_height_fraction)
        } else {
            return false;
        };

        if screen_length <= 0.0 {
            log::warn!("Invalid screen size {screen_size:?}, swipe ignored");
            return false;
        }

        swipe.intensity / screen_length >= min_fraction
    }
}
