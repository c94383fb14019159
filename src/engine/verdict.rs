use crate::Utility;
use serde::Deserialize;
use serde::Serialize;

/// Grade of one decision by its EV gap to the best line.
/// Thresholds are in big blinds and inclusive on the low side:
/// within simulation noise (0.01) is Excellent, up to 0.2 Good,
/// up to 0.8 Leak, beyond that Major Leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Excellent,
    Good,
    Leak,
    MajorLeak,
}

impl From<Utility> for Verdict {
    fn from(ev_loss_bb: Utility) -> Self {
        if ev_loss_bb <= 0.01 {
            Self::Excellent
        } else if ev_loss_bb <= 0.2 {
            Self::Good
        } else if ev_loss_bb <= 0.8 {
            Self::Leak
        } else {
            Self::MajorLeak
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Leak => write!(f, "Leak"),
            Self::MajorLeak => write!(f, "Major Leak"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(Verdict::from(0.0), Verdict::Excellent);
        assert_eq!(Verdict::from(0.01), Verdict::Excellent);
        assert_eq!(Verdict::from(0.011), Verdict::Good);
        assert_eq!(Verdict::from(0.2), Verdict::Good);
        assert_eq!(Verdict::from(0.21), Verdict::Leak);
        assert_eq!(Verdict::from(0.8), Verdict::Leak);
        assert_eq!(Verdict::from(0.81), Verdict::MajorLeak);
        assert_eq!(Verdict::from(5.0), Verdict::MajorLeak);
    }

    #[test]
    fn negative_gap_is_excellent() {
        assert_eq!(Verdict::from(-0.3), Verdict::Excellent);
    }
}
