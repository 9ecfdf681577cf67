mod swipe_evaluator;
pub use self::swipe_evaluator::*;
mod tap_evaluator;
pub use self::tap_evaluator::*;
mod pinch_evaluator;
pub use self::pinch_evaluator::*;
mod tilt_evaluator;
pub use self::tilt_evaluator::*;
