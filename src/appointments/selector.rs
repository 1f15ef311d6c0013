use rand::Rng;

/// Strategy for choosing one stylist among several eligible candidates.
///
/// Injected into the booking service so tests can pin the choice.
pub trait StylistPicker: Send + Sync {
    /// Return an index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Production picker: uniform random choice
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl StylistPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic picker for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl StylistPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_stays_in_bounds() {
        let picker = RandomPicker;
        for len in 1..20 {
            for _ in 0..50 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_fixed_picker_clamps() {
        assert_eq!(FixedPicker(0).pick(3), 0);
        assert_eq!(FixedPicker(2).pick(3), 2);
        assert_eq!(FixedPicker(9).pick(3), 2);
    }
}
