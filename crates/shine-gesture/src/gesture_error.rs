use thiserror::Error as ThisError;

/// Touch bookkeeping errors. They indicate lost or duplicated phase notifications from the host and
/// never stop the frame processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum GestureError {
    #[error("No open touch history for finger {0}, the began phase was missed")]
    UnknownFinger(u64),
    #[error("Finger {0} is already tracked, the ended or cancelled phase was missed")]
    DuplicateBegin(u64),
}

impl GestureError {
    pub fn finger_id(&self) -> u64 {
        match self {
            GestureError::UnknownFinger(id) | GestureError::DuplicateBegin(id) => *id,
        }
    }
}
