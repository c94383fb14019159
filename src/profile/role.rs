use serde::Deserialize;
use serde::Serialize;

/// What a seat has done so far on the current street.
/// The range and continuation models tighten or loosen around it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Bettor,
    Caller,
    Waiting,
    HeroToAct,
    Out,
}

impl Role {
    /// a bettor has shown strength, a waiting player none yet
    pub const fn tightness_bonus(&self) -> f64 {
        match self {
            Self::Bettor => 0.10,
            Self::Caller => 0.02,
            Self::Waiting => -0.05,
            Self::HeroToAct | Self::Out => 0.0,
        }
    }

    /// shift on continue probability versus a hero bet or raise
    pub const fn continue_shift(&self) -> f64 {
        match self {
            Self::Bettor => 0.08,
            Self::Caller => 0.05,
            Self::Waiting => -0.03,
            Self::HeroToAct | Self::Out => 0.0,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Bettor => write!(f, "bettor"),
            Self::Caller => write!(f, "caller"),
            Self::Waiting => write!(f, "waiting"),
            Self::HeroToAct => write!(f, "hero_to_act"),
            Self::Out => write!(f, "out"),
        }
    }
}
