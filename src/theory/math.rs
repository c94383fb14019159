//! Closed-form poker math.
//!
//! Every function is total on nonnegative inputs and clamps negative
//! amounts to zero rather than failing; coaching text cites these
//! thresholds verbatim, so the formulas stay explicit.

use crate::Chips;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

const EPSILON: f64 = 1e-9;

/// Break-even equity for a call: call / (pot + call).
pub fn required_equity_to_call(pot_before_call: Chips, call_amount: Chips) -> Probability {
    let pot = pot_before_call.max(0.0);
    let call = call_amount.max(0.0);
    if call <= 0.0 {
        return 0.0;
    }
    call / (pot + call).max(EPSILON)
}

/// Minimum defense frequency against a pure bluff: pot / (pot + bet).
pub fn minimum_defense_frequency(pot_before_bet: Chips, bet_size: Chips) -> Probability {
    let pot = pot_before_bet.max(0.0);
    let bet = bet_size.max(0.0);
    if bet <= 0.0 {
        return 1.0;
    }
    (pot / (pot + bet).max(EPSILON)).clamp(0.0, 1.0)
}

/// Required fold frequency for a zero-equity bluff: risk / (risk + reward).
pub fn break_even_bluff_fold_frequency(risk: Chips, reward: Chips) -> Probability {
    let risk = risk.max(0.0);
    let reward = reward.max(0.0);
    if risk <= 0.0 {
        return 0.0;
    }
    (risk / (risk + reward).max(EPSILON)).clamp(0.0, 1.0)
}

/// Bluff share of a polarized one-street betting range: b / (1 + b).
pub fn polarized_bluff_share(bet_to_pot_ratio: f64) -> Probability {
    let b = bet_to_pot_ratio.max(0.0);
    if b <= 0.0 {
        return 0.0;
    }
    (b / (1.0 + b)).clamp(0.0, 1.0)
}

/// Bluff:value ratio under the same polarized model, which is just b.
pub fn bluff_to_value_ratio(bet_to_pot_ratio: f64) -> f64 {
    bet_to_pot_ratio.max(0.0)
}

/// Effective stack divided by pot.
pub fn stack_to_pot_ratio(effective_stack: Chips, pot_size: Chips) -> f64 {
    effective_stack.max(0.0) / pot_size.max(EPSILON)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdfPoint {
    pub bet_to_pot: f64,
    pub mdf: Probability,
}

/// Quick MDF table for common bet sizes.
pub fn common_mdf_reference() -> Vec<MdfPoint> {
    [0.25, 0.33, 0.5, 0.66, 0.75, 1.0, 1.5]
        .into_iter()
        .map(|b| MdfPoint {
            bet_to_pot: b,
            mdf: crate::round(minimum_defense_frequency(1.0, b), 4),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded(x: f64) -> f64 {
        crate::round(x, 4)
    }

    #[test]
    fn pot_odds_literals() {
        assert_eq!(rounded(required_equity_to_call(10.0, 5.0)), 0.3333);
        assert_eq!(required_equity_to_call(10.0, 0.0), 0.0);
        assert_eq!(required_equity_to_call(-3.0, 5.0), 1.0);
    }

    #[test]
    fn mdf_literals() {
        assert_eq!(rounded(minimum_defense_frequency(10.0, 5.0)), 0.6667);
        assert_eq!(minimum_defense_frequency(10.0, 0.0), 1.0);
    }

    #[test]
    fn bluff_break_even_literals() {
        assert_eq!(rounded(break_even_bluff_fold_frequency(5.0, 10.0)), 0.3333);
        assert_eq!(break_even_bluff_fold_frequency(0.0, 10.0), 0.0);
    }

    #[test]
    fn polarization_literals() {
        assert_eq!(rounded(polarized_bluff_share(0.75)), 0.4286);
        assert_eq!(polarized_bluff_share(-1.0), 0.0);
        assert_eq!(bluff_to_value_ratio(0.75), 0.75);
    }

    #[test]
    fn spr_is_stack_over_pot() {
        assert_eq!(stack_to_pot_ratio(100.0, 20.0), 5.0);
        assert!(stack_to_pot_ratio(100.0, 0.0) > 1e9);
    }

    #[test]
    fn mdf_reference_is_sorted_and_bounded() {
        let table = common_mdf_reference();
        assert_eq!(table.len(), 7);
        for pair in table.windows(2) {
            assert!(pair[0].mdf > pair[1].mdf);
        }
    }
}
