//! How hard the "No" answer has been pushed away.

/// Added per decline, in hundredths.
const STEP: u32 = 35;
/// Upper bound, in hundredths.
const CAP: u32 = 3000;

/// Grows by 0.35 with every decline until it reaches 30.
///
/// Kept in hundredths so repeated declines add up exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reluctance(u32);

impl Reluctance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decline(&mut self) {
        self.0 = (self.0 + STEP).min(CAP);
    }

    pub fn magnitude(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_capped(&self) -> bool {
        self.0 == CAP
    }

    /// Relative size of the "Yes" answer.
    pub fn yes_scale(&self) -> f64 {
        1.0 + self.magnitude()
    }

    /// Spacing between the two answers.
    pub fn gap(&self) -> f64 {
        2.0 + self.yes_scale() * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let r = Reluctance::new();
        assert_eq!(r.magnitude(), 0.0);
        assert_eq!(r.yes_scale(), 1.0);
        assert_eq!(r.gap(), 4.0);
    }

    #[test]
    fn three_declines() {
        let mut r = Reluctance::new();
        for _ in 0..3 {
            r.decline();
        }
        assert_eq!(r.magnitude(), 1.05);
    }

    #[test]
    fn grows_by_step_until_capped() {
        let mut r = Reluctance::new();
        let mut previous = r;

        for n in 1..=200u32 {
            r.decline();
            assert!(r >= previous);
            assert!(r.magnitude() <= 30.0);
            if !previous.is_capped() && !r.is_capped() {
                assert_eq!(r.0 - previous.0, STEP, "decline #{n}");
            }
            previous = r;
        }

        assert!(r.is_capped());
        assert_eq!(r.magnitude(), 30.0);
    }

    #[test]
    fn cap_is_reached_on_the_86th_decline() {
        let mut r = Reluctance::new();
        for _ in 0..85 {
            r.decline();
        }
        assert!(!r.is_capped());
        r.decline();
        assert!(r.is_capped());
    }
}
