use bevy::math::Vec2;

/// Lifecycle state of a single finger contact in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

/// A finger contact as reported by the host for the current frame.
///
/// Positions are in screen coordinates (pixels) with the origin at the bottom-left corner and the Y axis
/// pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    pub finger_id: u64,
    pub position: Vec2,
    /// Movement since the previous frame.
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl TouchInput {
    pub fn new(finger_id: u64, phase: TouchPhase, position: Vec2) -> Self {
        Self {
            finger_id,
            position,
            delta: Vec2::ZERO,
            phase,
        }
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    /// Position of the finger in the previous frame.
    pub fn previous_position(&self) -> Vec2 {
        self.position - self.delta
    }
}

/// Raw input of a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Monotonically increasing time in seconds.
    pub timestamp: f32,
    /// Screen width and height in pixels.
    pub screen_size: Vec2,
    /// Device acceleration in normalized units, zero when there is no accelerometer.
    pub acceleration: Vec2,
    pub touches: Vec<TouchInput>,
}

impl FrameInput {
    pub fn new(timestamp: f32, screen_size: Vec2) -> Self {
        Self {
            timestamp,
            screen_size,
            acceleration: Vec2::ZERO,
            touches: Vec::new(),
        }
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_touch(mut self, touch: TouchInput) -> Self {
        self.touches.push(touch);
        self
    }
}
