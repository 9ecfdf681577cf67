use bevy::math::Vec2;
use shine_gesture::{
    ActionTrigger, ArgumentTrigger, FrameInput, FrameReport, GestureBus, GestureEvent, GestureReaction,
    GestureRecognizer, GestureSettings, ReactionField, TouchInput, TouchPhase,
};
use std::sync::{Arc, Mutex};

pub const SCREEN: Vec2 = Vec2::new(1000.0, 1000.0);
pub const FRAME_TIME: f32 = 0.1;

/// A topic received on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Action(ActionTrigger),
    Argument(ArgumentTrigger, GestureEvent),
}

impl Received {
    pub fn trigger_name(&self) -> String {
        match self {
            Received::Action(trigger) => format!("{trigger:?}"),
            Received::Argument(trigger, _) => format!("{trigger:?}"),
        }
    }
}

pub fn began(id: u64, x: f32, y: f32) -> TouchInput {
    TouchInput::new(id, TouchPhase::Began, Vec2::new(x, y))
}

pub fn moved(id: u64, x: f32, y: f32, dx: f32, dy: f32) -> TouchInput {
    TouchInput::new(id, TouchPhase::Moved, Vec2::new(x, y)).with_delta(Vec2::new(dx, dy))
}

pub fn stationary(id: u64, x: f32, y: f32) -> TouchInput {
    TouchInput::new(id, TouchPhase::Stationary, Vec2::new(x, y))
}

pub fn ended(id: u64, x: f32, y: f32) -> TouchInput {
    TouchInput::new(id, TouchPhase::Ended, Vec2::new(x, y))
}

pub fn cancelled(id: u64, x: f32, y: f32) -> TouchInput {
    TouchInput::new(id, TouchPhase::Cancelled, Vec2::new(x, y))
}

/// A recognizer with a bus and a reaction recording every published topic.
pub struct GestureSession {
    pub recognizer: GestureRecognizer,
    pub bus: GestureBus,
    reaction: GestureReaction,
    received: Arc<Mutex<Vec<Received>>>,
    time: f32,
    acceleration: Vec2,
}

impl GestureSession {
    pub fn new(settings: GestureSettings) -> Self {
        let recognizer = GestureRecognizer::new(settings).unwrap();
        let mut bus = GestureBus::default();
        let received = Arc::new(Mutex::new(Vec::new()));

        let field = ReactionField::all()
            .on_action({
                let received = received.clone();
                move |trigger| received.lock().unwrap().push(Received::Action(trigger))
            })
            .on_argument({
                let received = received.clone();
                move |trigger, event| {
                    received
                        .lock()
                        .unwrap()
                        .push(Received::Argument(trigger, *event))
                }
            });
        let mut reaction = GestureReaction::new().with_field(field);
        reaction.setup(&mut bus);

        Self {
            recognizer,
            bus,
            reaction,
            received,
            time: 0.0,
            acceleration: Vec2::ZERO,
        }
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    /// Process a frame at the next time step.
    pub fn frame(&mut self, touches: &[TouchInput]) -> FrameReport {
        let mut frame = FrameInput::new(self.time, SCREEN).with_acceleration(self.acceleration);
        frame.touches.extend_from_slice(touches);
        self.time += FRAME_TIME;

        let report = self.recognizer.process(&frame, &mut self.bus);
        log::debug!("frame {}: {report:?}", frame.timestamp);
        report
    }

    /// Return and clear the topics received since the last call.
    pub fn take(&mut self) -> Vec<Received> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }

    pub fn take_names(&mut self) -> Vec<String> {
        self.take().iter().map(Received::trigger_name).collect()
    }

    pub fn shutdown(&mut self) {
        self.reaction.shutdown(&mut self.bus);
    }
}
