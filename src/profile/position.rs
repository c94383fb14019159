use serde::Deserialize;
use serde::Serialize;

/// Table position at a 2-7 handed cash table.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Position {
    UTG,
    LJ,
    HJ,
    CO,
    BTN,
    SB,
    BB,
}

impl Position {
    /// shift applied to the equity realization base rate:
    /// late position realizes more, the blinds less
    pub const fn realization_bonus(&self) -> f64 {
        match self {
            Self::BTN => 0.08,
            Self::CO => 0.05,
            Self::HJ => 0.03,
            Self::LJ => 0.01,
            Self::UTG => -0.01,
            Self::SB => -0.08,
            Self::BB => -0.05,
        }
    }

    /// target open-VPIP band for coaching feedback
    pub const fn open_target(&self) -> (f64, f64) {
        match self {
            Self::UTG => (0.17, 0.23),
            Self::LJ => (0.20, 0.27),
            Self::HJ => (0.22, 0.30),
            Self::CO => (0.30, 0.39),
            Self::BTN => (0.44, 0.60),
            Self::SB => (0.35, 0.48),
            Self::BB => (0.00, 0.00),
        }
    }

    pub const fn is_blind(&self) -> bool {
        matches!(self, Self::SB | Self::BB)
    }
    pub const fn is_early(&self) -> bool {
        matches!(self, Self::UTG | Self::LJ | Self::HJ)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_realizes_most() {
        let best = [
            Position::UTG,
            Position::LJ,
            Position::HJ,
            Position::CO,
            Position::BTN,
            Position::SB,
            Position::BB,
        ]
        .into_iter()
        .max_by(|a, b| {
            a.realization_bonus()
                .partial_cmp(&b.realization_bonus())
                .unwrap()
        });
        assert_eq!(best, Some(Position::BTN));
    }
}
