use super::math::stack_to_pot_ratio;
use crate::Chips;
use serde::Serialize;

/// Rule-of-thumb SPR band with canned planning notes.
/// Thresholds are part of the contract: <2.0, <4.5, <8.0, else High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SprBand {
    pub label: &'static str,
    pub notes: [&'static str; 2],
}

pub fn classify_spr(spr: f64) -> SprBand {
    let s = spr.max(0.0);
    if s < 2.0 {
        SprBand {
            label: "Very Low SPR",
            notes: [
                "Commitment threshold is low; value edges realize quickly.",
                "Avoid high-frequency pure bluffs unless fold equity is clear.",
            ],
        }
    } else if s < 4.5 {
        SprBand {
            label: "Low SPR",
            notes: [
                "One-pair plus strong draws gain stack-off value more often.",
                "Pressure lines should be size-disciplined to avoid over-investing weak bluff-catchers.",
            ],
        }
    } else if s < 8.0 {
        SprBand {
            label: "Medium SPR",
            notes: [
                "Mix value and pressure; future-street realization matters.",
                "Favor hands with redraws/blockers when building aggressive lines.",
            ],
        }
    } else {
        SprBand {
            label: "High SPR",
            notes: [
                "Nutted potential rises in value; medium made hands become thinner stacks-off.",
                "Use selective aggression and protect against reverse implied odds.",
            ],
        }
    }
}

/// Convenience: classify directly from stack and pot.
pub fn classify_stack_and_pot(effective_stack: Chips, pot: Chips) -> SprBand {
    classify_spr(stack_to_pot_ratio(effective_stack, pot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(classify_spr(0.0).label, "Very Low SPR");
        assert_eq!(classify_spr(1.99).label, "Very Low SPR");
        assert_eq!(classify_spr(2.0).label, "Low SPR");
        assert_eq!(classify_spr(4.49).label, "Low SPR");
        assert_eq!(classify_spr(4.5).label, "Medium SPR");
        assert_eq!(classify_spr(7.99).label, "Medium SPR");
        assert_eq!(classify_spr(8.0).label, "High SPR");
        assert_eq!(classify_spr(-1.0).label, "Very Low SPR");
    }
}
