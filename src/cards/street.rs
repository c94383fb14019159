use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    #[serde(rename = "preflop")]
    Pref,
    #[serde(rename = "flop")]
    Flop,
    #[serde(rename = "turn")]
    Turn,
    #[serde(rename = "river")]
    Rive,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    /// how many board cards are visible on this street
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
    /// undiscounted growth of the pot over the streets still to come,
    /// used by the passive-action EV model
    pub const fn future_factor(&self) -> f64 {
        match self {
            Self::Pref => 2.2,
            Self::Flop => 1.45,
            Self::Turn => 1.2,
            Self::Rive => 1.0,
        }
    }
    /// realization shifts as fewer streets remain to be outplayed
    pub const fn realization_shift(&self) -> f64 {
        match self {
            Self::Pref => -0.05,
            Self::Flop => 0.0,
            Self::Turn => 0.03,
            Self::Rive => 0.06,
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_counts() {
        assert_eq!(Street::Pref.n_observed(), 0);
        assert_eq!(Street::Flop.n_observed(), 3);
        assert_eq!(Street::Rive.n_observed(), 5);
    }

    #[test]
    fn river_has_no_future() {
        assert_eq!(Street::Rive.future_factor(), 1.0);
    }
}
