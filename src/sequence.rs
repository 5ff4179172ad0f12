use crate::error::SequenceError;

/// Slack when counting steps so that `end` is reached despite rounding
const STEP_EPSILON: f64 = 1e-9;

/// Lazy sequence of rotation angles from `start` to `end` inclusive.
///
/// Values are computed as `start + i * step` rather than accumulated, so the
/// last value lands on `end` without drift. Cloning gives an independent
/// cursor, which makes the sweep restartable.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSequence {
    start: f64,
    step: f64,
    len: usize,
    index: usize,
}

impl Default for AngleSequence {
    /// A full turn, one degree per frame (361 values).
    fn default() -> Self {
        Self {
            start: 0.0,
            step: 1.0,
            len: 361,
            index: 0,
        }
    }
}

impl AngleSequence {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, SequenceError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SequenceError::InvalidStep(step));
        }
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(SequenceError::InvalidRange { start, end });
        }

        // A span the step cannot count through gives inf, or more frames than usize holds
        let steps = ((end - start) / step + STEP_EPSILON).floor();
        if !steps.is_finite() || steps >= usize::MAX as f64 {
            return Err(SequenceError::InvalidRange { start, end });
        }
        let len = steps as usize + 1;
        Ok(Self {
            start,
            step,
            len,
            index: 0,
        })
    }

    /// Total number of angles, independent of how many were consumed.
    pub fn total(&self) -> usize {
        self.len
    }

    /// Position of the next angle to be yielded.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Rewind to the first angle.
    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl Iterator for AngleSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let angle = self.start + self.index as f64 * self.step;
        self.index += 1;
        Some(angle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AngleSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_turn_has_361_frames() {
        let angles: Vec<f64> = AngleSequence::new(0.0, 360.0, 1.0).unwrap().collect();
        assert_eq!(angles.len(), 361);
        assert_eq!(angles[0], 0.0);
        assert_eq!(angles[360], 360.0);
        assert!(angles.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_default_matches_full_turn() {
        let default = AngleSequence::default();
        assert_eq!(default, AngleSequence::new(0.0, 360.0, 1.0).unwrap());
        assert_eq!(default.len(), 361);
    }

    #[test]
    fn test_fractional_step_reaches_end() {
        let angles: Vec<f64> = AngleSequence::new(0.0, 1.0, 0.1).unwrap().collect();
        assert_eq!(angles.len(), 11);
        assert!((angles[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_end_not_on_grid_is_excluded() {
        let angles: Vec<f64> = AngleSequence::new(0.0, 10.0, 3.0).unwrap().collect();
        assert_eq!(angles, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_single_value_when_start_equals_end() {
        let angles: Vec<f64> = AngleSequence::new(45.0, 45.0, 1.0).unwrap().collect();
        assert_eq!(angles, vec![45.0]);
    }

    #[test]
    fn test_restart_replays_sequence() {
        let mut seq = AngleSequence::new(0.0, 4.0, 2.0).unwrap();
        let first: Vec<f64> = seq.by_ref().collect();
        assert_eq!(seq.position(), 3);
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.total(), 3);

        seq.restart();
        let second: Vec<f64> = seq.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut seq = AngleSequence::default();
        seq.next();
        let copy = seq.clone();
        seq.next();
        assert_eq!(copy.position(), 1);
        assert_eq!(seq.position(), 2);
    }

    #[test]
    fn test_rejects_bad_step() {
        assert_eq!(
            AngleSequence::new(0.0, 360.0, 0.0),
            Err(SequenceError::InvalidStep(0.0))
        );
        assert_eq!(
            AngleSequence::new(0.0, 360.0, -1.0),
            Err(SequenceError::InvalidStep(-1.0))
        );
        assert!(AngleSequence::new(0.0, 360.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert_eq!(
            AngleSequence::new(10.0, 0.0, 1.0),
            Err(SequenceError::InvalidRange {
                start: 10.0,
                end: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_range_too_long_to_count() {
        assert_eq!(
            AngleSequence::new(-1e308, 1e308, 1.0),
            Err(SequenceError::InvalidRange {
                start: -1e308,
                end: 1e308
            })
        );
        assert_eq!(
            AngleSequence::new(0.0, 1e300, 1e-300),
            Err(SequenceError::InvalidRange {
                start: 0.0,
                end: 1e300
            })
        );
        assert!(AngleSequence::new(0.0, 1e30, 1.0).is_err());
    }

    #[test]
    fn test_large_but_countable_range() {
        let seq = AngleSequence::new(0.0, 1e9, 1.0).unwrap();
        assert_eq!(seq.total(), 1_000_000_001);
    }
}
