use crate::GestureError;
use bevy::math::Vec2;
use std::collections::BTreeMap;

/// A time-stamped position of a finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub timestamp: f32,
    pub position: Vec2,
}

/// The trace of a single finger contact ordered by time.
/// It always contains at least the start sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchHistory {
    finger_id: u64,
    trace: Vec<TouchSample>,
}

impl TouchHistory {
    pub fn new(finger_id: u64, timestamp: f32, position: Vec2) -> Self {
        Self {
            finger_id,
            trace: vec![TouchSample { timestamp, position }],
        }
    }

    pub fn finger_id(&self) -> u64 {
        self.finger_id
    }

    /// Add a sample. Samples are dropped unless their timestamp is strictly
    /// greater than the last recorded one.
    pub fn push(&mut self, timestamp: f32, position: Vec2) -> bool {
        if timestamp > self.last().timestamp {
            self.trace.push(TouchSample { timestamp, position });
            true
        } else {
            false
        }
    }

    pub fn samples(&self) -> &[TouchSample] {
        &self.trace
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &TouchSample {
        &self.trace[0]
    }

    pub fn last(&self) -> &TouchSample {
        &self.trace[self.trace.len() - 1]
    }

    /// Time elapsed between the first and the last sample in seconds.
    pub fn duration(&self) -> f32 {
        self.last().timestamp - self.first().timestamp
    }

    /// Straight line movement from the first to the last sample.
    pub fn displacement(&self) -> Vec2 {
        self.last().position - self.first().position
    }
}

/// The open touch histories keyed by finger id.
///
/// Only touch phase transitions close a history, there is no time based eviction.
#[derive(Debug, Default)]
pub struct TouchHistoryStore {
    histories: BTreeMap<u64, TouchHistory>,
}

impl TouchHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new history for the finger. An already tracked finger is left untouched and reported.
    pub fn begin(&mut self, finger_id: u64, timestamp: f32, position: Vec2) -> Result<(), GestureError> {
        if self.histories.contains_key(&finger_id) {
            return Err(GestureError::DuplicateBegin(finger_id));
        }

        log::trace!("Touch {finger_id} began at {position:?} ({timestamp})");
        self.histories
            .insert(finger_id, TouchHistory::new(finger_id, timestamp, position));
        Ok(())
    }

    /// Record a sample for a tracked finger. Return if the sample was recorded.
    pub fn append(&mut self, finger_id: u64, timestamp: f32, position: Vec2) -> bool {
        match self.histories.get_mut(&finger_id) {
            Some(history) => {
                let recorded = history.push(timestamp, position);
                if recorded {
                    log::trace!("Touch {finger_id} at {position:?} ({timestamp})");
                } else {
                    log::trace!("Touch {finger_id}, sample dropped, timestamp {timestamp} is not increasing");
                }
                recorded
            }
            None => false,
        }
    }

    /// Close the history of the finger and return it.
    pub fn end(&mut self, finger_id: u64) -> Result<TouchHistory, GestureError> {
        self.histories
            .remove(&finger_id)
            .ok_or(GestureError::UnknownFinger(finger_id))
    }

    pub fn get(&self, finger_id: u64) -> Option<&TouchHistory> {
        self.histories.get(&finger_id)
    }

    pub fn contains(&self, finger_id: u64) -> bool {
        self.histories.contains_key(&finger_id)
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    pub fn finger_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.histories.keys().copied()
    }

    pub fn clear(&mut self) {
        self.histories.clear();
    }
}
