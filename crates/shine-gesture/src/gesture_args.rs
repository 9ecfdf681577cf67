use crate::GestureEvent;
use bevy::math::Vec2;

impl GestureEvent {
    pub fn start_pos(&self) -> Vec2 {
        match self {
            GestureEvent::Swipe(swipe) => swipe.start_pos,
            GestureEvent::Tap(tap) => tap.position,
            GestureEvent::Pinch(pinch) => pinch.start_pos,
            GestureEvent::Tilt(_) => Vec2::ZERO,
        }
    }

    pub fn end_pos(&self) -> Vec2 {
        match self {
            GestureEvent::Swipe(swipe) => swipe.end_pos,
            GestureEvent::Tap(tap) => tap.position,
            GestureEvent::Pinch(pinch) => pinch.end_pos,
            GestureEvent::Tilt(_) => Vec2::ZERO,
        }
    }

    /// The movement described by the gesture.
    /// For pinch it is the finger to finger vector scaled by the distance change.
    pub fn direction(&self) -> Vec2 {
        match self {
            GestureEvent::Swipe(swipe) => swipe.vector,
            GestureEvent::Tap(_) => self.end_pos() - self.start_pos(),
            GestureEvent::Pinch(pinch) => (pinch.end_pos - pinch.start_pos) * pinch.delta_movement,
            GestureEvent::Tilt(tilt) => tilt.movement_vector,
        }
    }

    /// Signed strength of the gesture.
    pub fn magnitude(&self) -> f32 {
        match self {
            GestureEvent::Swipe(swipe) => swipe.vector.length(),
            GestureEvent::Tap(_) => 0.0,
            GestureEvent::Pinch(pinch) => pinch.delta_movement,
            GestureEvent::Tilt(tilt) => tilt.movement_vector.length(),
        }
    }

    /// Point of interest of the gesture.
    /// Vector movements (swipe, tilt) use the start offset by the vector scaled with half of its length,
    /// pinch uses the start offset by the direction scaled with the distance change.
    pub fn focus_point(&self) -> Vec2 {
        match self {
            GestureEvent::Swipe(_) | GestureEvent::Tilt(_) => {
                self.start_pos() + self.direction() * (self.magnitude() / 2.0)
            }
            GestureEvent::Tap(tap) => tap.position,
            GestureEvent::Pinch(pinch) => self.start_pos() + self.direction() * pinch.delta_movement,
        }
    }
}
