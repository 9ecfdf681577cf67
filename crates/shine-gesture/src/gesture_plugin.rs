use crate::{
    FrameInput, GestureBus, GestureRecognizer, GestureSettings, SettingsError, TouchInput, TouchPhase,
};
use bevy::{
    app::{App, Plugin, PreUpdate},
    ecs::{
        error::BevyError,
        resource::Resource,
        schedule::{IntoScheduleConfigs, SystemSet},
        system::{Query, Res, ResMut},
    },
    input::{touch::Touches, InputSystem},
    math::Vec2,
    time::{Real, Time},
    window::Window,
};

#[derive(SystemSet, Clone, Hash, Debug, PartialEq, Eq)]
pub enum GestureSystem {
    Recognize,
}

/// Device acceleration written by the host, zero when there is no accelerometer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceAcceleration(pub Vec2);

pub struct GesturePlugin {
    settings: GestureSettings,
}

impl GesturePlugin {
    pub fn new(settings: GestureSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GestureRecognizer::with_validated_settings(self.settings.clone()));
        app.init_resource::<GestureBus>();
        app.init_resource::<DeviceAcceleration>();

        app.configure_sets(PreUpdate, GestureSystem::Recognize.after(InputSystem));
        app.add_systems(PreUpdate, recognize_gestures.in_set(GestureSystem::Recognize));
    }
}

/// Convert a bevy position (origin at the top-left, Y down) into gesture screen space (Y up).
fn to_screen_space(position: Vec2, screen_height: f32) -> Vec2 {
    Vec2::new(position.x, screen_height - position.y)
}

fn to_screen_delta(delta: Vec2) -> Vec2 {
    Vec2::new(delta.x, -delta.y)
}

/// Collect the touches of the frame ordered by finger id.
/// A touch pressed and lifted within the same frame yields a began and an ended (or cancelled) entry.
fn collect_touches(touches: &Touches, screen_height: f32) -> Vec<TouchInput> {
    let mut frame_touches = Vec::new();

    for touch in touches.iter() {
        let phase = if touches.just_pressed(touch.id()) {
            TouchPhase::Began
        } else if touch.delta() != Vec2::ZERO {
            TouchPhase::Moved
        } else {
            TouchPhase::Stationary
        };
        frame_touches.push(
            TouchInput::new(touch.id(), phase, to_screen_space(touch.position(), screen_height))
                .with_delta(to_screen_delta(touch.delta())),
        );
    }

    let lifted = touches
        .iter_just_released()
        .map(|touch| (touch, TouchPhase::Ended))
        .chain(touches.iter_just_canceled().map(|touch| (touch, TouchPhase::Cancelled)));
    for (touch, phase) in lifted {
        if touches.just_pressed(touch.id()) {
            frame_touches.push(TouchInput::new(
                touch.id(),
                TouchPhase::Began,
                to_screen_space(touch.start_position(), screen_height),
            ));
        }
        let delta = match phase {
            TouchPhase::Ended => to_screen_delta(touch.delta()),
            _ => Vec2::ZERO,
        };
        frame_touches.push(
            TouchInput::new(touch.id(), phase, to_screen_space(touch.position(), screen_height)).with_delta(delta),
        );
    }

    // stable sort, a began entry stays in front of the matching ended entry
    frame_touches.sort_by_key(|touch| touch.finger_id);
    frame_touches
}

pub fn recognize_gestures(
    time: Res<Time<Real>>,
    touches: Res<Touches>,
    window: Query<&Window>,
    acceleration: Res<DeviceAcceleration>,
    mut recognizer: ResMut<GestureRecognizer>,
    mut bus: ResMut<GestureBus>,
) -> Result<(), BevyError> {
    let window = window.single()?;
    let screen_size = Vec2::new(window.width(), window.height());

    let frame = FrameInput {
        timestamp: time.elapsed_secs(),
        screen_size,
        acceleration: acceleration.0,
        touches: collect_touches(&touches, screen_size.y),
    };

    let report = recognizer.process(&frame, &mut bus);
    if report.published > 0 || !report.is_ok() {
        log::debug!(
            "Gesture frame at {}: {} topic(s), {} error(s)",
            frame.timestamp,
            report.published,
            report.errors.len()
        );
    }

    Ok(())
}
