use crate::event_bus::{Event, EventBus, EventHandlerId};
use bevy::{ecs::resource::Resource, math::Vec2};
use std::ops;

/// Direction of a swipe in screen space (Y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
    None,
}

/// Direction of a device tilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TiltDirection {
    Right,
    Left,
    Forward,
    Backward,
    None,
}

/// A linear touch movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEvent {
    pub start_pos: Vec2,
    pub end_pos: Vec2,
    pub vector: Vec2,
    /// Length of the movement vector.
    pub intensity: f32,
    pub direction: SwipeDirection,
}

/// A short, near-stationary touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub position: Vec2,
}

/// Distance change between two fingers in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchEvent {
    /// Current position of the first finger.
    pub start_pos: Vec2,
    /// Current position of the second finger.
    pub end_pos: Vec2,
    /// Change of the finger distance, positive when the fingers separate.
    pub delta_movement: f32,
    pub intensity: f32,
}

/// A tilt of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltEvent {
    /// The device acceleration.
    pub movement_vector: Vec2,
    pub direction: TiltDirection,
}

/// The classified gesture records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Swipe(SwipeEvent),
    Tap(TapEvent),
    Pinch(PinchEvent),
    Tilt(TiltEvent),
}

impl From<SwipeEvent> for GestureEvent {
    fn from(event: SwipeEvent) -> Self {
        GestureEvent::Swipe(event)
    }
}

impl From<TapEvent> for GestureEvent {
    fn from(event: TapEvent) -> Self {
        GestureEvent::Tap(event)
    }
}

impl From<PinchEvent> for GestureEvent {
    fn from(event: PinchEvent) -> Self {
        GestureEvent::Pinch(event)
    }
}

impl From<TiltEvent> for GestureEvent {
    fn from(event: TiltEvent) -> Self {
        GestureEvent::Tilt(event)
    }
}

/// Domain of the gesture topics.
pub struct GestureDomain;

/// The bus the recognizer publishes the gesture topics on.
#[derive(Default, Resource)]
pub struct GestureBus(pub EventBus<GestureDomain>);

impl ops::Deref for GestureBus {
    type Target = EventBus<GestureDomain>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ops::DerefMut for GestureBus {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// A topic carrying a gesture record.
pub trait ArgumentEvent: Event<Domain = GestureDomain> {
    const TRIGGER: ArgumentTrigger;

    fn args(&self) -> GestureEvent;
}

/// A topic without payload.
pub trait ActionEvent: Event<Domain = GestureDomain> {
    const TRIGGER: ActionTrigger;
}

macro_rules! argument_events {
    ($($(#[$meta:meta])* $name:ident($payload:ident);)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq)]
            pub struct $name(pub $payload);

            impl Event for $name {
                type Domain = GestureDomain;
            }

            impl ArgumentEvent for $name {
                const TRIGGER: ArgumentTrigger = ArgumentTrigger::$name;

                fn args(&self) -> GestureEvent {
                    self.0.into()
                }
            }
        )*

        /// Topics carrying a gesture record.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ArgumentTrigger {
            $($name),*
        }

        impl ArgumentTrigger {
            pub const ALL: &'static [ArgumentTrigger] = &[$(ArgumentTrigger::$name),*];

            /// Subscribe a handler to the topic of the trigger.
            pub fn subscribe<F>(self, bus: &mut GestureBus, mut handler: F) -> EventHandlerId
            where
                F: FnMut(ArgumentTrigger, &GestureEvent) + Send + Sync + 'static,
            {
                match self {
                    $(
                        ArgumentTrigger::$name => bus.subscribe::<$name, _>(move |event: &$name| {
                            handler(ArgumentTrigger::$name, &event.args())
                        }),
                    )*
                }
            }
        }
    };
}

macro_rules! action_events {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl Event for $name {
                type Domain = GestureDomain;
            }

            impl ActionEvent for $name {
                const TRIGGER: ActionTrigger = ActionTrigger::$name;
            }
        )*

        /// Topics without payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ActionTrigger {
            $($name),*
        }

        impl ActionTrigger {
            pub const ALL: &'static [ActionTrigger] = &[$(ActionTrigger::$name),*];

            /// Subscribe a handler to the topic of the trigger.
            pub fn subscribe<F>(self, bus: &mut GestureBus, mut handler: F) -> EventHandlerId
            where
                F: FnMut(ActionTrigger) + Send + Sync + 'static,
            {
                match self {
                    $(
                        ActionTrigger::$name => bus.subscribe::<$name, _>(move |_: &$name| {
                            handler(ActionTrigger::$name)
                        }),
                    )*
                }
            }
        }
    };
}

argument_events! {
    /// A valid tap ended.
    Tap(TapEvent);
    /// A finger moved, carries the movement of the last frame.
    SwipeMoving(SwipeEvent);
    /// A valid swipe ended.
    SwipeEnded(SwipeEvent);
    /// Two fingers are down.
    PinchMoving(PinchEvent);
    /// Any tilt direction is over its threshold.
    OngoingTilt(TiltEvent);
    OngoingTiltLeft(TiltEvent);
    OngoingTiltRight(TiltEvent);
    OngoingTiltForward(TiltEvent);
    OngoingTiltBackward(TiltEvent);
}

action_events! {
    SwipeLeft;
    SwipeRight;
    SwipeUp;
    SwipeDown;
    /// A validated left tilt is over.
    EndedTiltLeft;
    EndedTiltRight;
    EndedTiltForward;
    EndedTiltBackward;
}
