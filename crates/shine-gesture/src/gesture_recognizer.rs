use crate::{
    evaluators::{PinchEvaluator, SwipeEvaluator, TapEvaluator, TiltEvaluator, TiltOutcome},
    EndedTiltBackward, EndedTiltForward, EndedTiltLeft, EndedTiltRight, FrameInput, GestureBus, GestureError,
    GestureSettings, OngoingTilt, OngoingTiltBackward, OngoingTiltForward, OngoingTiltLeft, OngoingTiltRight,
    PinchMoving, SettingsError, SwipeDirection, SwipeDown, SwipeEnded, SwipeEvent, SwipeLeft, SwipeMoving,
    SwipeRight, SwipeUp, Tap, TiltDirection, TouchHistoryStore, TouchInput, TouchPhase,
};
use bevy::{ecs::resource::Resource, math::Vec2};

/// Outcome of a processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Bookkeeping errors of the frame, the rest of the frame was processed regardless.
    pub errors: Vec<GestureError>,
    /// Number of topics published on the bus.
    pub published: usize,
}

impl FrameReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Round each component to the given number of decimals.
fn round_to_precision(value: Vec2, decimals: u32) -> Vec2 {
    let scale = 10f32.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Drives the evaluators from the per-frame input and publishes the classified gestures.
#[derive(Resource)]
pub struct GestureRecognizer {
    settings: GestureSettings,
    histories: TouchHistoryStore,
    swipe: SwipeEvaluator,
    tap: TapEvaluator,
    tilt: TiltEvaluator,
}

impl GestureRecognizer {
    pub fn new(settings: GestureSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::with_validated_settings(settings))
    }

    pub(crate) fn with_validated_settings(settings: GestureSettings) -> Self {
        Self {
            histories: TouchHistoryStore::new(),
            swipe: SwipeEvaluator::new(&settings),
            tap: TapEvaluator::new(&settings),
            tilt: TiltEvaluator::new(&settings),
            settings,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Replace the thresholds. Open touches and the active tilt directions are kept.
    pub fn set_settings(&mut self, settings: GestureSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        log::info!("Gesture settings replaced: {settings:?}");
        self.swipe = SwipeEvaluator::new(&settings);
        self.tap = TapEvaluator::new(&settings);
        self.tilt.set_thresholds(&settings);
        self.settings = settings;
        Ok(())
    }

    /// Number of fingers with an open history.
    pub fn active_touches(&self) -> usize {
        self.histories.len()
    }

    pub fn touch_histories(&self) -> &TouchHistoryStore {
        &self.histories
    }

    pub fn active_tilts(&self) -> impl Iterator<Item = TiltDirection> + '_ {
        self.tilt.active_directions()
    }

    /// Forget all open touches and tilts without publishing anything.
    pub fn reset(&mut self) {
        self.histories.clear();
        self.tilt.reset();
    }

    pub fn process(&mut self, frame: &FrameInput, bus: &mut GestureBus) -> FrameReport {
        log::trace!(
            "Frame at {}: {} touch(es), acceleration {:?}",
            frame.timestamp,
            frame.touches.len(),
            frame.acceleration
        );

        let mut report = FrameReport::default();

        self.process_tilt(frame.acceleration, bus, &mut report);

        for touch in &frame.touches {
            if touch.phase != TouchPhase::Began {
                self.histories.append(touch.finger_id, frame.timestamp, touch.position);
            }
        }

        for touch in &frame.touches {
            self.process_touch(touch, frame, bus, &mut report);
        }

        // a finger pressed and lifted within the frame is listed twice, that is not a pinch
        if let [first, second] = frame.touches.as_slice() {
            if first.finger_id != second.finger_id {
                let pinch = PinchEvaluator::evaluate(first, second);
                log::debug!("Pinch: {pinch:?}");
                bus.publish(&PinchMoving(pinch));
                report.published += 1;
            }
        }

        for error in &report.errors {
            log::warn!("{error}");
        }

        report
    }

    fn process_tilt(&mut self, acceleration: Vec2, bus: &mut GestureBus, report: &mut FrameReport) {
        let acceleration = match self.settings.acceleration_precision {
            Some(decimals) => round_to_precision(acceleration, decimals),
            None => acceleration,
        };

        let outcome = self.tilt.evaluate(acceleration);
        for direction in &outcome.ended {
            log::debug!("Tilt ended: {direction:?}");
            publish_tilt_ended(bus, *direction);
            report.published += 1;
        }

        for direction in &outcome.ongoing {
            publish_tilt_ongoing(bus, &outcome, *direction);
            report.published += 1;
        }

        if let Some(tilt) = outcome.event() {
            log::debug!("Tilt: {tilt:?}");
            bus.publish(&OngoingTilt(tilt));
            report.published += 1;
        }
    }

    fn process_touch(&mut self, touch: &TouchInput, frame: &FrameInput, bus: &mut GestureBus, report: &mut FrameReport) {
        let finger_id = touch.finger_id;

        match touch.phase {
            TouchPhase::Began => {
                if let Err(err) = self.histories.begin(finger_id, frame.timestamp, touch.position) {
                    report.errors.push(err);
                }
            }
            TouchPhase::Moved => {
                let swipe = SwipeEvaluator::evaluate_ongoing(touch.position, touch.delta);
                log::trace!("Touch {finger_id} moving: {swipe:?}");
                bus.publish(&SwipeMoving(swipe));
                report.published += 1;
            }
            TouchPhase::Ended => match self.histories.end(finger_id) {
                Ok(history) => {
                    if let Some(tap) = self.tap.evaluate(&history) {
                        log::debug!("Tap: {tap:?}");
                        bus.publish(&Tap(tap));
                        report.published += 1;
                    }

                    if let Some(swipe) = self.swipe.evaluate_completed(&history, frame.screen_size) {
                        log::debug!("Swipe: {swipe:?}");
                        if publish_swipe_direction(bus, &swipe) {
                            report.published += 1;
                        }
                        bus.publish(&SwipeEnded(swipe));
                        report.published += 1;
                    }
                }
                Err(err) => report.errors.push(err),
            },
            TouchPhase::Cancelled => {
                if let Err(err) = self.histories.end(finger_id) {
                    report.errors.push(err);
                }
            }
            TouchPhase::Stationary => {}
        }
    }
}

fn publish_swipe_direction(bus: &mut GestureBus, swipe: &SwipeEvent) -> bool {
    match swipe.direction {
        SwipeDirection::Left => bus.publish(&SwipeLeft),
        SwipeDirection::Right => bus.publish(&SwipeRight),
        SwipeDirection::Up => bus.publish(&SwipeUp),
        SwipeDirection::Down => bus.publish(&SwipeDown),
        SwipeDirection::None => return false,
    };
    true
}

fn publish_tilt_ended(bus: &mut GestureBus, direction: TiltDirection) {
    match direction {
        TiltDirection::Right => bus.publish(&EndedTiltRight),
        TiltDirection::Left => bus.publish(&EndedTiltLeft),
        TiltDirection::Forward => bus.publish(&EndedTiltForward),
        TiltDirection::Backward => bus.publish(&EndedTiltBackward),
        TiltDirection::None => 0,
    };
}

fn publish_tilt_ongoing(bus: &mut GestureBus, outcome: &TiltOutcome, direction: TiltDirection) {
    let event = outcome.directional_event(direction);
    match direction {
        TiltDirection::Right => bus.publish(&OngoingTiltRight(event)),
        TiltDirection::Left => bus.publish(&OngoingTiltLeft(event)),
        TiltDirection::Forward => bus.publish(&OngoingTiltForward(event)),
        TiltDirection::Backward => bus.publish(&OngoingTiltBackward(event)),
        TiltDirection::None => 0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use shine_test::test;

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to_precision(Vec2::new(0.123, -0.456), 2), Vec2::new(0.12, -0.46));
        assert_eq!(round_to_precision(Vec2::new(0.4, 0.6), 0), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = GestureSettings {
            min_horizontal_swipe_length: -1.0,
            ..Default::default()
        };
        assert!(GestureRecognizer::new(settings).is_err());

        let mut recognizer = GestureRecognizer::new(GestureSettings::default()).unwrap();
        let settings = GestureSettings {
            x_tilt_pos_threshold: 2.0,
            ..Default::default()
        };
        assert!(recognizer.set_settings(settings).is_err());
        assert_eq!(recognizer.settings(), &GestureSettings::default());
    }

    #[test]
    fn test_precision_cannot_disable_tilt() {
        let settings = GestureSettings {
            acceleration_precision: Some(40),
            ..Default::default()
        };
        assert!(matches!(
            GestureRecognizer::new(settings),
            Err(SettingsError::PrecisionTooHigh { .. })
        ));

        let settings = GestureSettings {
            acceleration_precision: Some(6),
            ..Default::default()
        };
        let mut recognizer = GestureRecognizer::new(settings).unwrap();
        let mut bus = GestureBus::default();
        let frame = FrameInput::new(0.0, Vec2::new(100.0, 100.0)).with_acceleration(Vec2::new(0.9, 0.0));
        assert_eq!(recognizer.process(&frame, &mut bus).published, 2);
        assert_eq!(recognizer.active_tilts().collect::<Vec<_>>(), vec![TiltDirection::Right]);
    }

    #[test]
    fn test_single_frame_touch_is_not_a_pinch() {
        let mut recognizer = GestureRecognizer::new(GestureSettings::default()).unwrap();
        let mut bus = GestureBus::default();

        let frame = FrameInput::new(0.0, Vec2::new(100.0, 100.0))
            .with_touch(TouchInput::new(3, TouchPhase::Began, Vec2::new(10.0, 10.0)))
            .with_touch(TouchInput::new(3, TouchPhase::Ended, Vec2::new(10.0, 10.0)));
        let report = recognizer.process(&frame, &mut bus);
        assert!(report.is_ok());
        assert_eq!(report.published, 0);
        assert_eq!(recognizer.active_touches(), 0);
    }

    #[test]
    fn test_cancel_discards_history() {
        let mut recognizer = GestureRecognizer::new(GestureSettings::default()).unwrap();
        let mut bus = GestureBus::default();
        let screen = Vec2::new(100.0, 100.0);

        let frame = FrameInput::new(0.0, screen).with_touch(TouchInput::new(1, TouchPhase::Began, Vec2::ZERO));
        assert!(recognizer.process(&frame, &mut bus).is_ok());
        assert_eq!(recognizer.active_touches(), 1);

        let frame = FrameInput::new(0.1, screen).with_touch(TouchInput::new(1, TouchPhase::Cancelled, Vec2::ZERO));
        let report = recognizer.process(&frame, &mut bus);
        assert!(report.is_ok());
        assert_eq!(report.published, 0);
        assert_eq!(recognizer.active_touches(), 0);
    }

    #[test]
    fn test_stationary_records_sample() {
        let mut recognizer = GestureRecognizer::new(GestureSettings::default()).unwrap();
        let mut bus = GestureBus::default();
        let screen = Vec2::new(100.0, 100.0);
        let position = Vec2::new(5.0, 5.0);

        recognizer.process(
            &FrameInput::new(0.0, screen).with_touch(TouchInput::new(7, TouchPhase::Began, position)),
            &mut bus,
        );
        let report = recognizer.process(
            &FrameInput::new(0.1, screen).with_touch(TouchInput::new(7, TouchPhase::Stationary, position)),
            &mut bus,
        );
        assert_eq!(report.published, 0);
        assert_eq!(recognizer.touch_histories().get(7).map(|h| h.len()), Some(2));

        recognizer.reset();
        assert_eq!(recognizer.active_touches(), 0);
    }
}
