use super::action::ActionKind;
use super::action::ActionRow;
use super::action::Decision;
use super::action::Intent;
use super::calculator::find_row;
use super::calculator::Calculator;
use super::report::archetype_mix_summary;
use super::report::average_street_fold_rate;
use super::report::blocker_signals;
use super::report::spot_math;
use super::scenario::Scenario;
use crate::cards::texture_score;
use crate::cards::TextureLabel;
use crate::error::Error;
use crate::profile::Archetypes;
use crate::profile::HeroProfile;
use crate::profile::Position;
use crate::Utility;
use serde::Deserialize;
use serde::Serialize;

/// One attributed slice of the EV gap. Impacts across a breakdown
/// sum to the total gap (within rounding) and are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakFactor {
    pub name: String,
    pub impact_bb: Utility,
    pub share_pct: f64,
    pub detail: String,
}

struct RawFactor {
    name: &'static str,
    raw_impact_bb: f64,
    detail: String,
}

/// Re-price the same decision in a modified copy of the scenario.
/// `None` means the decision has no priced counterpart there.
fn counterfactual_decision_ev(
    archetypes: &Archetypes,
    scenario: &Scenario,
    decision: &Decision,
    simulations: usize,
) -> Result<Option<Utility>, Error> {
    log::debug!("counterfactual rerun: {} over {} trials", decision, simulations);
    let mut calc = Calculator::new(archetypes, scenario, simulations)?;
    match calc.evaluate_choice(decision) {
        Ok(row) => Ok(Some(row.ev_bb)),
        Err(Error::ActionNotFound { .. }) => match calc.action_table() {
            Ok(table) => Ok(find_row(&table, decision).map(|row| row.ev_bb)),
            Err(Error::NoLegalActions) => Ok(None),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}

/// Decompose the EV gap into named, ranked causes.
///
/// Each candidate factor measures its own raw gap in big blinds;
/// the raws are then rescaled so attributed impacts sum to exactly
/// the observed loss, largest first, with a residual entry when the
/// named causes do not cover the whole gap.
#[allow(clippy::too_many_arguments)]
pub fn factor_breakdown(
    archetypes: &Archetypes,
    scenario: &Scenario,
    decision: &Decision,
    chosen: &ActionRow,
    best: &ActionRow,
    actions: &[ActionRow],
    simulations: usize,
) -> Result<Vec<LeakFactor>, Error> {
    let ev_loss = (best.ev_bb - chosen.ev_bb).max(0.0);
    if ev_loss <= 0.01 {
        return Ok(Vec::new());
    }

    let chosen_ev = chosen.ev_bb;
    let aggressive = chosen.action.is_aggressive();
    let spot = spot_math(scenario, chosen.action, chosen.size_bb.unwrap_or(0.0));
    let villains = scenario.active_villains();
    let blockers = blocker_signals(scenario.hero_hole, scenario.board);

    let mut raw: Vec<RawFactor> = Vec::new();

    let same_action: Vec<&ActionRow> =
        actions.iter().filter(|r| r.action == chosen.action).collect();
    if let Some(best_in_class) = same_action
        .iter()
        .max_by(|a, b| a.ev_bb.partial_cmp(&b.ev_bb).unwrap_or(std::cmp::Ordering::Equal))
    {
        let action_type_gap = (best.ev_bb - best_in_class.ev_bb).max(0.0);
        if action_type_gap > 0.02 {
            raw.push(RawFactor {
                name: "Action Choice",
                raw_impact_bb: action_type_gap,
                detail: format!(
                    "Best action class is {} ({:.3}bb) while chosen class was {} \
                     (best in-class {:.3}bb). Primary leak is line selection, not just sizing.",
                    best.action, best.ev_bb, chosen.action, best_in_class.ev_bb
                ),
            });
        }
    }

    if chosen.action == ActionKind::Call && spot.to_call_bb > 0.0 {
        let eq_gap = (spot.required_equity - chosen.equity).max(0.0);
        if eq_gap > 0.015 {
            raw.push(RawFactor {
                name: "Pot Odds Discipline",
                raw_impact_bb: eq_gap * (spot.pot_bb + spot.to_call_bb) * 0.8,
                detail: format!(
                    "Call required about {:.1}% equity but line had {:.1}%. \
                     Calling below threshold leaks immediately unless implied odds are strong.",
                    spot.required_equity * 100.0,
                    chosen.equity * 100.0
                ),
            });
        }
    }

    if chosen.action == ActionKind::Fold
        && spot.to_call_bb > 0.0
        && matches!(best.action, ActionKind::Call | ActionKind::Raise)
    {
        let overfold_gap = (best.equity - spot.required_equity).max(0.0);
        if overfold_gap > 0.015 {
            raw.push(RawFactor {
                name: "Overfold vs Price",
                raw_impact_bb: overfold_gap * (spot.pot_bb + spot.to_call_bb) * 0.7,
                detail: format!(
                    "Pot odds asked for {:.1}% equity, while stronger continuing lines held \
                     about {:.1}%. Folding surrendered too much defendable equity.",
                    spot.required_equity * 100.0,
                    best.equity * 100.0
                ),
            });
        }
    }

    if aggressive {
        let same_intent: Vec<&ActionRow> = actions
            .iter()
            .filter(|r| r.action == chosen.action && r.intent == chosen.intent)
            .collect();
        if let Some(best_same_intent) = same_intent
            .iter()
            .max_by(|a, b| a.ev_bb.partial_cmp(&b.ev_bb).unwrap_or(std::cmp::Ordering::Equal))
        {
            let sizing_gap = (best_same_intent.ev_bb - chosen_ev).max(0.0);
            if sizing_gap > 0.02 {
                raw.push(RawFactor {
                    name: "Sizing",
                    raw_impact_bb: sizing_gap,
                    detail: format!(
                        "Within {}/{} lines, better sizing existed ({}bb).",
                        chosen.action,
                        chosen.intent.map(|i| i.to_string()).unwrap_or_default(),
                        best_same_intent.size_bb.unwrap_or(0.0)
                    ),
                });
            }
        }

        if let (Some(size), Some(intent)) = (chosen.size_bb, chosen.intent) {
            let alt = intent.other();
            let alt_row = actions.iter().find(|r| {
                r.action == chosen.action
                    && r.intent == Some(alt)
                    && r.size_bb.map(|s| crate::round(s, 1)) == Some(crate::round(size, 1))
            });
            if let Some(alt_row) = alt_row {
                let intent_gap = (alt_row.ev_bb - chosen_ev).max(0.0);
                if intent_gap > 0.02 {
                    raw.push(RawFactor {
                        name: "Value/Bluff Mix",
                        raw_impact_bb: intent_gap,
                        detail: format!(
                            "For the same size, tagging this line as {} \
                             performed better against these ranges.",
                            alt
                        ),
                    });
                }
            }
        }

        if chosen.intent == Some(Intent::Bluff) {
            let required_fe = spot.be_bluff_fold_freq;
            let achieved_fe = chosen.fold_equity;
            let bluff_math_gap = (required_fe - achieved_fe).max(0.0);
            if bluff_math_gap > 0.03 {
                raw.push(RawFactor {
                    name: "Bluff Economics",
                    raw_impact_bb: bluff_math_gap * chosen.risk_bb.max(0.5),
                    detail: format!(
                        "Bluff needed {:.1}% folds at this risk/reward, model estimated {:.1}%.",
                        required_fe * 100.0,
                        achieved_fe * 100.0
                    ),
                });
            }

            if !blockers.flush_nut_blocker && blockers.broadway_blockers == 0 {
                let blocker_gap = (ev_loss * 0.35).min(0.22);
                if blocker_gap > 0.02 {
                    raw.push(RawFactor {
                        name: "Blocker Quality",
                        raw_impact_bb: blocker_gap,
                        detail: "Bluff line lacked high-card/nut blockers, so villain \
                                 continues retained too many strong calls."
                            .to_string(),
                    });
                }
            }
        }
    }

    let counterfactual_sims = (simulations / 2).clamp(120, 220);
    let neutral = scenario.with_hero_profile(HeroProfile::neutral());
    if let Some(neutral_ev) =
        counterfactual_decision_ev(archetypes, &neutral, decision, counterfactual_sims)?
    {
        let image_gap = (neutral_ev - chosen_ev).max(0.0);
        if image_gap > 0.02 {
            let hero = &scenario.hero_profile;
            raw.push(RawFactor {
                name: "Hero Table Image (VPIP/PFR/AF)",
                raw_impact_bb: image_gap,
                detail: format!(
                    "Your current profile shifts villain continues versus this line \
                     (style={}, image_bluffiness={:.2}); pool adjusted by calling \
                     lighter versus perceived aggression.",
                    hero.style_label(),
                    hero.image_bluffiness()
                ),
            });
        }
    }

    if scenario.hero_position != Position::BTN {
        let on_button = scenario.with_hero_position(Position::BTN);
        if let Some(btn_ev) =
            counterfactual_decision_ev(archetypes, &on_button, decision, counterfactual_sims)?
        {
            let pos_gap = (btn_ev - chosen_ev).max(0.0) * 0.7;
            if pos_gap > 0.02 {
                raw.push(RawFactor {
                    name: "Position Leverage",
                    raw_impact_bb: pos_gap,
                    detail: format!(
                        "Same line as BTN estimated {:.3}bb versus {:.3}bb here; \
                         OOP realization and check-back denial reduced EV.",
                        btn_ev, chosen_ev
                    ),
                });
            }
        }
    }

    if scenario.players_in_hand > 2 && aggressive && chosen.intent == Some(Intent::Bluff) {
        let size_ratio = chosen.size_bb.unwrap_or(0.0) / scenario.pot_bb.max(1.0);
        let multiway_gap = ((scenario.players_in_hand - 2) as f64 * (0.12 + 0.18 * size_ratio))
            .min(ev_loss * 0.8);
        if multiway_gap > 0.02 {
            raw.push(RawFactor {
                name: "Multiway Bluff Penalty",
                raw_impact_bb: multiway_gap,
                detail: format!(
                    "{}-way node reduced fold-chain reliability; multiway bluffs require \
                     stronger blocker/equity backup than heads-up nodes.",
                    scenario.players_in_hand
                ),
            });
        }
    }

    if !villains.is_empty() {
        let avg_fold = average_street_fold_rate(archetypes, &villains, scenario.street)?;
        let mix = archetype_mix_summary(archetypes, &villains)?;
        let (exploit_gap, detail) = match chosen.intent {
            Some(Intent::Bluff) => (
                (0.44 - avg_fold).max(0.0) * 2.1,
                format!(
                    "Pool ({}) folds too little on {} (avg {:.2}) \
                     for this bluff frequency/size.",
                    mix, scenario.street, avg_fold
                ),
            ),
            Some(Intent::Value) => (
                (avg_fold - 0.60).max(0.0) * 1.2,
                format!(
                    "Pool ({}) folds often (avg {:.2}); value line likely needed \
                     smaller sizing or stronger value density.",
                    mix, avg_fold
                ),
            ),
            None => (0.0, String::new()),
        };
        if exploit_gap > 0.02 {
            raw.push(RawFactor {
                name: "Opponent Archetype Mismatch",
                raw_impact_bb: exploit_gap,
                detail,
            });
        }
    }

    let texture = texture_score(scenario.board);
    if chosen.intent == Some(Intent::Bluff) && texture >= 1.4 {
        let texture_gap = (ev_loss * 0.4).min(0.18 * texture);
        if texture_gap > 0.02 {
            raw.push(RawFactor {
                name: "Board Texture",
                raw_impact_bb: texture_gap,
                detail: format!(
                    "{} texture ({:.2}) lowers fold equity and increases natural \
                     continues from pair+draw holdings.",
                    TextureLabel::from(texture).title(),
                    texture
                ),
            });
        }
    }

    if spot.spr >= 8.0 && aggressive && chosen.intent == Some(Intent::Bluff) {
        let spr_gap = (ev_loss * 0.35).min(0.24);
        if spr_gap > 0.02 {
            raw.push(RawFactor {
                name: "SPR Planning",
                raw_impact_bb: spr_gap,
                detail: format!(
                    "High SPR ({:.1}) rewards nutted potential and selective aggression; \
                     line over-committed medium equity.",
                    spot.spr
                ),
            });
        }
    }

    Ok(scale_to_loss(raw, ev_loss))
}

/// Rescale raw impacts so they account for the gap exactly, largest
/// first; whatever the named factors cannot explain becomes residual.
fn scale_to_loss(mut raw: Vec<RawFactor>, ev_loss: Utility) -> Vec<LeakFactor> {
    if raw.is_empty() {
        return Vec::new();
    }
    let total_raw: f64 = raw.iter().map(|f| f.raw_impact_bb).sum();
    if total_raw <= 0.0 {
        return Vec::new();
    }

    raw.sort_by(|a, b| {
        b.raw_impact_bb
            .partial_cmp(&a.raw_impact_bb)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let scale = ev_loss / total_raw;
    let mut factors = Vec::with_capacity(raw.len() + 1);
    let mut remaining = ev_loss;
    for factor in raw {
        let impact = crate::round(factor.raw_impact_bb * scale, 3)
            .min(crate::round(remaining.max(0.0), 3));
        remaining = crate::round((remaining - impact).max(0.0), 3);
        factors.push(LeakFactor {
            name: factor.name.to_string(),
            impact_bb: impact,
            share_pct: crate::round(impact / ev_loss * 100.0, 1),
            detail: factor.detail,
        });
    }

    if remaining > 0.04 {
        factors.push(LeakFactor {
            name: "Residual/Model Uncertainty".to_string(),
            impact_bb: crate::round(remaining, 3),
            share_pct: crate::round(remaining / ev_loss * 100.0, 1),
            detail: "Remaining gap from interactions between factors and simulation variance."
                .to_string(),
        });
    }

    factors
}
