use crate::cards::Street;
use crate::engine::ActionKind;
use crate::error::Error;
use crate::profile::Archetype;
use crate::profile::Role;
use crate::Probability;

/// Estimate how often a villain continues versus a hero bet or raise.
///
/// Starts from the archetype's street fold rate (or its continue
/// rate versus raises), penalizes larger sizings, and nudges for the
/// seat's shown strength and the archetype's aggression. Clamped to
/// [0.05, 0.95] so no villain is ever a certain fold or a certain call.
pub fn continue_probability(
    archetype: &Archetype,
    street: Street,
    action: ActionKind,
    size_pot_ratio: f64,
    role: Role,
) -> Result<Probability, Error> {
    let base = match action {
        ActionKind::Raise => archetype.continue_vs_raise,
        ActionKind::Bet => 1.0 - archetype.fold_to_bet(street),
        other => {
            return Err(Error::InvalidInput(format!(
                "continue probability is defined for bet/raise, got {}",
                other
            )))
        }
    };

    let mut size_penalty = (size_pot_ratio - 0.5).max(0.0) * 0.20;
    if street == Street::Rive {
        size_penalty *= 1.25;
    }
    let aggression_adj = (archetype.aggression - 0.5) * 0.14;

    Ok((base - size_penalty + role.continue_shift() + aggression_adj).clamp(0.05, 0.95))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Archetypes;

    fn continue_vs_bet(key: &str, street: Street, ratio: f64) -> Probability {
        let archetypes = Archetypes::standard();
        continue_probability(
            archetypes.get(key).unwrap(),
            street,
            ActionKind::Bet,
            ratio,
            Role::Waiting,
        )
        .unwrap()
    }

    #[test]
    fn stations_continue_more_than_nits() {
        let station = continue_vs_bet("calling_station", Street::Flop, 0.6);
        let nit = continue_vs_bet("nit", Street::Flop, 0.6);
        assert!(station > nit);
    }

    #[test]
    fn bigger_sizings_fold_more() {
        let small = continue_vs_bet("tag_reg", Street::Turn, 0.33);
        let large = continue_vs_bet("tag_reg", Street::Turn, 1.2);
        assert!(small > large);
    }

    #[test]
    fn river_amplifies_the_size_penalty() {
        let overbet = 1.5;
        let turn = continue_vs_bet("tag_reg", Street::Turn, overbet);
        let river = continue_vs_bet("tag_reg", Street::Rive, overbet);
        // river fold rates already run higher, so compare the penalty
        let turn_base = continue_vs_bet("tag_reg", Street::Turn, 0.5);
        let river_base = continue_vs_bet("tag_reg", Street::Rive, 0.5);
        assert!((river_base - river) > (turn_base - turn));
    }

    #[test]
    fn fold_and_check_are_rejected() {
        let archetypes = Archetypes::standard();
        let tag = archetypes.get("tag_reg").unwrap();
        for action in [ActionKind::Fold, ActionKind::Check, ActionKind::Call] {
            assert!(
                continue_probability(tag, Street::Flop, action, 0.5, Role::Waiting).is_err()
            );
        }
    }

    #[test]
    fn always_within_bounds() {
        for key in ["nit", "maniac", "calling_station"] {
            for ratio in [0.0, 0.5, 1.0, 3.0] {
                let p = continue_vs_bet(key, Street::Rive, ratio);
                assert!((0.05..=0.95).contains(&p));
            }
        }
    }
}
