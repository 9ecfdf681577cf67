use crate::{GestureSettings, TiltDirection, TiltEvent};
use bevy::math::Vec2;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TiltThresholds {
    x_pos: f32,
    x_neg: f32,
    y_pos: f32,
    y_neg: f32,
}

impl From<&GestureSettings> for TiltThresholds {
    fn from(settings: &GestureSettings) -> Self {
        Self {
            x_pos: settings.x_tilt_pos_threshold,
            x_neg: settings.x_tilt_neg_threshold,
            y_pos: settings.y_tilt_pos_threshold,
            y_neg: settings.y_tilt_neg_threshold,
        }
    }
}

/// Result of the tilt evaluation of a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiltOutcome {
    /// Directions that were active in the previous frame but are not valid anymore.
    pub ended: Vec<TiltDirection>,
    /// Directions over their threshold in this frame.
    pub ongoing: Vec<TiltDirection>,
    pub acceleration: Vec2,
}

impl TiltOutcome {
    pub fn is_tilting(&self) -> bool {
        !self.ongoing.is_empty()
    }

    /// The event of a single ongoing direction.
    pub fn directional_event(&self, direction: TiltDirection) -> TiltEvent {
        TiltEvent {
            movement_vector: self.acceleration,
            direction,
        }
    }

    /// The generic ongoing tilt event, present if any direction is over its threshold.
    pub fn event(&self) -> Option<TiltEvent> {
        self.is_tilting().then(|| self.directional_event(TiltDirection::None))
    }
}

/// Classify the device acceleration into tilt directions and track the active directions
/// from frame to frame.
#[derive(Debug, Clone)]
pub struct TiltEvaluator {
    thresholds: TiltThresholds,
    active: BTreeSet<TiltDirection>,
}

impl TiltEvaluator {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            thresholds: settings.into(),
            active: BTreeSet::new(),
        }
    }

    /// Replace the thresholds, the active directions are kept.
    pub fn set_thresholds(&mut self, settings: &GestureSettings) {
        self.thresholds = settings.into();
    }

    /// Geometric directions of the acceleration, at most one per axis, horizontal first.
    pub fn classify(acceleration: Vec2) -> Vec<TiltDirection> {
        let mut directions = Vec::with_capacity(2);

        if acceleration.x > 0.0 {
            directions.push(TiltDirection::Right);
        } else if acceleration.x < 0.0 {
            directions.push(TiltDirection::Left);
        }

        if acceleration.y > 0.0 {
            directions.push(TiltDirection::Forward);
        } else if acceleration.y < 0.0 {
            directions.push(TiltDirection::Backward);
        }

        directions
    }

    pub fn is_over_threshold(&self, direction: TiltDirection, acceleration: Vec2) -> bool {
        match direction {
            TiltDirection::Right => acceleration.x >= self.thresholds.x_pos,
            TiltDirection::Left => acceleration.x <= self.thresholds.x_neg,
            TiltDirection::Forward => acceleration.y >= self.thresholds.y_pos,
            TiltDirection::Backward => acceleration.y <= self.thresholds.y_neg,
            TiltDirection::None => false,
        }
    }

    pub fn evaluate(&mut self, acceleration: Vec2) -> TiltOutcome {
        let ongoing: Vec<_> = Self::classify(acceleration)
            .into_iter()
            .filter(|direction| self.is_over_threshold(*direction, acceleration))
            .collect();

        // Only directions that passed their threshold in an earlier frame can end.
        let ended: Vec<_> = self
            .active
            .iter()
            .copied()
            .filter(|direction| !ongoing.contains(direction))
            .collect();
        for direction in &ended {
            self.active.remove(direction);
        }
        self.active.extend(ongoing.iter().copied());

        TiltOutcome {
            ended,
            ongoing,
            acceleration,
        }
    }

    pub fn active_directions(&self) -> impl Iterator<Item = TiltDirection> + '_ {
        self.active.iter().copied()
    }

    pub fn reset(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shine_test::test;

    fn evaluator() -> TiltEvaluator {
        TiltEvaluator::new(&GestureSettings::default())
    }

    #[test]
    fn test_classify() {
        assert!(TiltEvaluator::classify(Vec2::ZERO).is_empty());
        assert_eq!(TiltEvaluator::classify(Vec2::new(0.2, 0.0)), vec![TiltDirection::Right]);
        assert_eq!(
            TiltEvaluator::classify(Vec2::new(-0.2, -0.1)),
            vec![TiltDirection::Left, TiltDirection::Backward]
        );
        assert_eq!(TiltEvaluator::classify(Vec2::new(0.0, 0.3)), vec![TiltDirection::Forward]);
    }

    #[test]
    fn test_start_and_end() {
        let mut tilt = evaluator();

        let outcome = tilt.evaluate(Vec2::new(0.5, 0.0));
        assert_eq!(outcome.ongoing, vec![TiltDirection::Right]);
        assert!(outcome.ended.is_empty());
        assert_eq!(
            outcome.event(),
            Some(TiltEvent {
                movement_vector: Vec2::new(0.5, 0.0),
                direction: TiltDirection::None
            })
        );

        let outcome = tilt.evaluate(Vec2::new(0.1, 0.0));
        assert!(outcome.ongoing.is_empty());
        assert_eq!(outcome.ended, vec![TiltDirection::Right]);
        assert_eq!(outcome.event(), None);

        let outcome = tilt.evaluate(Vec2::new(0.1, 0.0));
        assert!(outcome.ended.is_empty());
        assert_eq!(tilt.active_directions().count(), 0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut tilt = TiltEvaluator::new(&GestureSettings {
            x_tilt_neg_threshold: -0.5,
            ..Default::default()
        });

        assert_eq!(tilt.evaluate(Vec2::new(-0.5, 0.0)).ongoing, vec![TiltDirection::Left]);
        assert_eq!(tilt.evaluate(Vec2::new(-0.25, 0.0)).ended, vec![TiltDirection::Left]);
    }

    #[test]
    fn test_unvalidated_direction_never_ends() {
        let mut tilt = evaluator();

        assert!(tilt.evaluate(Vec2::new(0.2, -0.3)).ongoing.is_empty());
        let outcome = tilt.evaluate(Vec2::new(-0.2, 0.3));
        assert!(outcome.ended.is_empty());
        let outcome = tilt.evaluate(Vec2::ZERO);
        assert!(outcome.ended.is_empty());
    }

    #[test]
    fn test_two_axes() {
        let mut tilt = evaluator();

        let outcome = tilt.evaluate(Vec2::new(-0.6, 0.7));
        assert_eq!(outcome.ongoing, vec![TiltDirection::Left, TiltDirection::Forward]);

        let outcome = tilt.evaluate(Vec2::new(0.6, 0.7));
        assert_eq!(outcome.ended, vec![TiltDirection::Left]);
        assert_eq!(outcome.ongoing, vec![TiltDirection::Right, TiltDirection::Forward]);

        let outcome = tilt.evaluate(Vec2::ZERO);
        assert_eq!(outcome.ended, vec![TiltDirection::Right, TiltDirection::Forward]);
    }

    #[test]
    fn test_thresholds_replaced() {
        let mut tilt = evaluator();
        tilt.evaluate(Vec2::new(0.0, 0.5));

        tilt.set_thresholds(&GestureSettings {
            y_tilt_pos_threshold: 0.8,
            ..Default::default()
        });
        assert_eq!(tilt.active_directions().collect::<Vec<_>>(), vec![TiltDirection::Forward]);
        assert_eq!(tilt.evaluate(Vec2::new(0.0, 0.5)).ended, vec![TiltDirection::Forward]);
    }
}
