/// produces: [ start + i * step | i <- 0..steps ]
/// (does NOT include "end")
///
/// steps = floor((end - start) / step), so the last value stays below
/// "end" even when the span is not a whole multiple of the step
#[derive(Clone, Debug)]
pub struct FloatIterator {
    current: u64,
    steps: u64,
    start: f64,
    step: f64,
}

impl FloatIterator {
    pub fn new_with_step(start: f64, end: f64, step: f64) -> Self {
        let steps = ((end - start) / step).abs().floor() as u64;
        FloatIterator {
            current: 0,
            steps,
            start,
            step,
        }
    }

    pub fn length(&self) -> u64 {
        self.steps - self.current
    }

    fn at(&self, pos: u64) -> f64 {
        self.start + pos as f64 * self.step
    }

    /// panics (in debug) when len doesn't fit in usize
    fn usize_len(&self) -> usize {
        let l = self.length();
        debug_assert!(l <= usize::MAX as u64);
        l as usize
    }
}

impl Iterator for FloatIterator {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.steps {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.usize_len();
        (l, Some(l))
    }

    fn count(self) -> usize {
        self.usize_len()
    }
}

impl ExactSizeIterator for FloatIterator {
    fn len(&self) -> usize {
        self.usize_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn yields_fixed_step_values() {
        let values: Vec<f64> = FloatIterator::new_with_step(1.0, 1.05, 0.01).collect();
        assert_eq!(values.len(), 5);
        assert_approx_eq!(values[0], 1.0);
        assert_approx_eq!(values[1], 1.01);
        assert_approx_eq!(values[4], 1.04);
    }

    #[test]
    fn excludes_the_end() {
        for v in FloatIterator::new_with_step(0.0, 2.0, 0.01) {
            assert!(v < 2.0);
        }
    }

    #[test]
    fn floors_a_partial_last_step() {
        let values: Vec<f64> = FloatIterator::new_with_step(0.0, 0.25, 0.1).collect();
        assert_eq!(values.len(), 2);
        assert_approx_eq!(values[1], 0.1);
    }

    #[test]
    fn empty_when_span_is_below_one_step() {
        let mut it = FloatIterator::new_with_step(1.0, 1.005, 0.01);
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
    }
}
