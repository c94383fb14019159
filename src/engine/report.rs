use super::action::ActionKind;
use super::action::ActionRow;
use super::action::Decision;
use super::action::Intent;
use super::calculator::build_action_table;
use super::calculator::find_row;
use super::leaks::factor_breakdown;
use super::leaks::LeakFactor;
use super::scenario::ActionContext;
use super::scenario::NodeType;
use super::scenario::Scenario;
use super::scenario::Seat;
use super::verdict::Verdict;
use crate::cards::texture_score;
use crate::cards::Hand;
use crate::cards::Hole;
use crate::cards::Street;
use crate::cards::Suit;
use crate::cards::TextureLabel;
use crate::error::Error;
use crate::profile::Archetypes;
use crate::profile::Guidance;
use crate::profile::HeroSummary;
use crate::theory::bluff_to_value_ratio;
use crate::theory::break_even_bluff_fold_frequency;
use crate::theory::classify_spr;
use crate::theory::minimum_defense_frequency;
use crate::theory::polarized_bluff_share;
use crate::theory::required_equity_to_call;
use crate::theory::stack_to_pot_ratio;
use crate::Chips;
use crate::Probability;
use crate::Utility;
use serde::Serialize;

/// Risk/reward pair a bluff at this node is laying, for break-even
/// fold-frequency math. A raise only risks its increment over the
/// call and also wins the bet it is raising over.
pub fn bluff_risk_reward(scenario: &Scenario, action: ActionKind, size_bb: Chips) -> (Chips, Chips) {
    let pot = scenario.pot_bb;
    let to_call = scenario.to_call_bb;
    match action {
        ActionKind::Bet => (size_bb, pot.max(0.0)),
        ActionKind::Raise => ((size_bb - to_call).max(0.1), (pot + to_call).max(0.0)),
        _ => (0.0, pot.max(0.0)),
    }
}

/// Closed-form numbers for the spot and one chosen line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotMath {
    pub pot_bb: Chips,
    pub to_call_bb: Chips,
    pub spr: f64,
    pub spr_label: &'static str,
    pub spr_notes: [&'static str; 2],
    pub required_equity: Probability,
    pub mdf: Probability,
    pub bet_to_pot: f64,
    pub be_bluff_fold_freq: Probability,
    pub target_bluff_share: Probability,
    pub target_bluff_to_value_ratio: f64,
    pub chosen_action: ActionKind,
    pub chosen_size_bb: Chips,
}

pub fn spot_math(scenario: &Scenario, action: ActionKind, size_bb: Chips) -> SpotMath {
    let pot = scenario.pot_bb;
    let to_call = scenario.to_call_bb;
    let spr = stack_to_pot_ratio(scenario.effective_stack_bb, pot.max(1.0));
    let band = classify_spr(spr);

    let required_equity = required_equity_to_call(pot, to_call);
    let mdf = if to_call > 0.0 {
        minimum_defense_frequency((pot - to_call).max(0.0), to_call)
    } else {
        1.0
    };

    let bet_to_pot = if size_bb > 0.0 { size_bb / pot.max(1.0) } else { 0.0 };
    let (risk, reward) = bluff_risk_reward(scenario, action, size_bb);
    let be_bluff_fold_freq = if size_bb > 0.0 {
        break_even_bluff_fold_frequency(risk, reward)
    } else {
        0.0
    };

    SpotMath {
        pot_bb: pot,
        to_call_bb: to_call,
        spr,
        spr_label: band.label,
        spr_notes: band.notes,
        required_equity,
        mdf,
        bet_to_pot,
        be_bluff_fold_freq,
        target_bluff_share: polarized_bluff_share(bet_to_pot),
        target_bluff_to_value_ratio: bluff_to_value_ratio(bet_to_pot),
        chosen_action: action,
        chosen_size_bb: size_bb,
    }
}

/// Card-removal diagnostics for coaching text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockerSignals {
    pub flush_nut_blocker: bool,
    pub broadway_blockers: usize,
    pub paired_board_blockers: usize,
    pub signal_text: String,
}

pub fn blocker_signals(hole: Hole, board: Hand) -> BlockerSignals {
    let (a, b) = hole.cards();
    let hero_cards = [a, b];

    let flush_suit = Suit::all().into_iter().find(|s| board.of(s).size() >= 3);
    let flush_nut_blocker = flush_suit.map_or(false, |suit| {
        hero_cards
            .iter()
            .any(|c| c.suit() == suit && c.rank().value() >= 13)
    });

    let broadway_blockers = hero_cards.iter().filter(|c| c.rank().value() >= 10).count();
    let paired_board_blockers = hero_cards
        .iter()
        .filter(|c| board.into_iter().filter(|bc| bc.rank() == c.rank()).count() >= 2)
        .count();

    let mut notes: Vec<&str> = Vec::new();
    if flush_nut_blocker {
        notes.push("holds high flush blocker");
    }
    if broadway_blockers >= 2 {
        notes.push("double broadway blockers");
    } else if broadway_blockers == 1 {
        notes.push("single broadway blocker");
    }
    if paired_board_blockers > 0 {
        notes.push("blocks full-house combos on paired board");
    }

    BlockerSignals {
        flush_nut_blocker,
        broadway_blockers,
        paired_board_blockers,
        signal_text: if notes.is_empty() {
            "blocker profile is neutral".to_string()
        } else {
            notes.join(", ")
        },
    }
}

/// Pattern tags describing what kind of mistake was made, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MistakeTag {
    Overfold,
    Overbluff,
    TooThinValue,
    MissedValue,
    Underbluff,
}

pub fn mistake_tags(chosen: &ActionRow, best: &ActionRow, ev_loss: Utility) -> Vec<MistakeTag> {
    let mut tags = Vec::new();
    if ev_loss < 0.3 {
        return tags;
    }
    if chosen.action == ActionKind::Fold && best.action != ActionKind::Fold {
        tags.push(MistakeTag::Overfold);
    }
    if chosen.intent == Some(Intent::Bluff) && ev_loss > 0.8 {
        tags.push(MistakeTag::Overbluff);
    }
    if chosen.intent == Some(Intent::Value) && chosen.ev_bb < 0.0 {
        tags.push(MistakeTag::TooThinValue);
    }
    if matches!(chosen.action, ActionKind::Call | ActionKind::Check) && best.action.is_aggressive()
    {
        tags.push(MistakeTag::MissedValue);
    }
    if chosen.action.is_aggressive()
        && chosen.intent == Some(Intent::Value)
        && best.intent == Some(Intent::Bluff)
    {
        tags.push(MistakeTag::Underbluff);
    }
    tags
}

/// "TAG Reg x2, Nit x1" style digest of the active villain pool.
pub fn archetype_mix_summary(archetypes: &Archetypes, villains: &[&Seat]) -> Result<String, Error> {
    if villains.is_empty() {
        return Ok("no active villains".to_string());
    }
    let mut counts = std::collections::BTreeMap::new();
    for villain in villains {
        *counts.entry(villain.archetype_key.as_str()).or_insert(0usize) += 1;
    }
    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
        .iter()
        .take(2)
        .map(|(key, n)| Ok(format!("{} x{}", archetypes.get(key)?.label, n)))
        .collect::<Result<Vec<String>, Error>>()
        .map(|chunks| chunks.join(", "))
}

/// Mean fold-to-bet rate of the pool on this street.
/// An empty pool reads as a generic 45%.
pub fn average_street_fold_rate(
    archetypes: &Archetypes,
    villains: &[&Seat],
    street: Street,
) -> Result<Probability, Error> {
    if villains.is_empty() {
        return Ok(0.45);
    }
    let mut sum = 0.0;
    for villain in villains {
        sum += archetypes.get(&villain.archetype_key)?.fold_to_bet(street);
    }
    Ok(sum / villains.len() as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentSnapshot {
    pub archetype_mix: String,
    pub average_street_fold_rate: Probability,
    pub players_in_hand: usize,
    pub texture_label: TextureLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotDigest {
    pub required_equity: Probability,
    pub mdf: Probability,
    pub spr: f64,
    pub spr_label: &'static str,
}

/// Hero-facing coaching bundle: profile summary, positional
/// guidance, and up to twelve prioritized recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroAnalysis {
    pub hero_profile: HeroSummary,
    pub position_guidance: Guidance,
    pub recommendations: Vec<String>,
    pub opponent_snapshot: OpponentSnapshot,
    pub spot_math: SpotDigest,
}

pub fn hero_profile_analysis(
    archetypes: &Archetypes,
    scenario: &Scenario,
    chosen: Option<&ActionRow>,
    best: Option<&ActionRow>,
) -> Result<HeroAnalysis, Error> {
    let hero = &scenario.hero_profile;
    let guidance = hero.position_guidance(scenario.hero_position, scenario.street);
    let villains = scenario.active_villains();
    let texture = texture_score(scenario.board);
    let texture_label = TextureLabel::from(texture);
    let archetype_mix = archetype_mix_summary(archetypes, &villains)?;
    let spot = match chosen {
        Some(row) => spot_math(scenario, row.action, row.size_bb.unwrap_or(0.0)),
        None => spot_math(scenario, ActionKind::Check, 0.0),
    };
    let blockers = blocker_signals(scenario.hero_hole, scenario.board);

    let mut recommendations: Vec<String> = Vec::new();
    let (low, high) = guidance.target_open_vpip_range;
    if hero.vpip() < low - 0.02 {
        recommendations.push(
            "VPIP is below positional target; widen in-position opens to avoid passing \
             profitable steals."
                .to_string(),
        );
    }
    if hero.vpip() > high + 0.06 {
        recommendations.push(
            "VPIP is above positional target; prune weakest offsuit opens to reduce \
             dominated postflop nodes."
                .to_string(),
        );
    }
    if hero.vpip_pfr_gap() > 0.10 {
        recommendations.push(
            "VPIP-PFR gap is large: replace marginal flats with more 3-bets/folds to \
             avoid capped ranges."
                .to_string(),
        );
    }
    if hero.af() > 3.9 {
        recommendations.push(
            "AF is very high: cap low-blocker river bluffs and retain more bluff-catchers \
             in your checking range."
                .to_string(),
        );
    }
    if hero.fold_to_3bet() > 0.65 {
        recommendations.push(
            "Fold-to-3bet is high: defend selected suited broadways and pocket pairs to \
             reduce exploitability."
                .to_string(),
        );
    }

    if spot.to_call_bb > 0.0 {
        recommendations.push(format!(
            "Facing {:.1}bb, call threshold is {:.1}% equity; baseline MDF is {:.1}% \
             before exploit adjustments.",
            spot.to_call_bb,
            spot.required_equity * 100.0,
            spot.mdf * 100.0
        ));
    }

    recommendations.push(format!(
        "SPR is {:.1} ({}): {}",
        spot.spr, spot.spr_label, spot.spr_notes[0]
    ));
    recommendations.push(
        match scenario.node_type {
            NodeType::SingleRaisedPot => {
                "SRP node: leverage range advantage on favorable boards with disciplined \
                 small-to-medium sizings."
            }
            NodeType::ThreeBetPot => {
                "3-bet pot: tighten bluff density and prioritize blocker quality plus \
                 nut-advantage board classes."
            }
            NodeType::FourBetPot => {
                "4-bet pot: very range-dense node, so shift toward high-card/blocker-driven \
                 decisions and lower pure-bluff frequency."
            }
        }
        .to_string(),
    );
    recommendations.push(
        match scenario.action_context {
            ActionContext::CheckedToHero => {
                "Checked-to-hero node: run high-frequency stabs on dry boards, but retain \
                 check-back protection on medium-strength holdings."
            }
            ActionContext::FacingBet => {
                "Facing-bet node: anchor decisions around pot-odds threshold, then adjust \
                 exploitively by villain fold/call profile."
            }
            ActionContext::FacingBetAndCall => {
                "Facing bet+call node: weight value-heavy raises and reduce thin bluffs \
                 because at least one range has already continued."
            }
        }
        .to_string(),
    );

    if scenario.players_in_hand > 2 {
        recommendations.push(format!(
            "Multiway ({} players) and {} board reduce bluff efficiency; keep bluffs \
             blocker-driven and size-disciplined.",
            scenario.players_in_hand, texture_label
        ));
    } else if texture_label == TextureLabel::Dry {
        recommendations.push(
            "Heads-up on dry texture supports higher small-size stab frequency, especially \
             in position."
                .to_string(),
        );
    } else {
        recommendations.push(format!(
            "{} texture rewards equity-driven barreling over pure range-denial bluffs.",
            texture_label.title()
        ));
    }

    let avg_fold = average_street_fold_rate(archetypes, &villains, scenario.street)?;
    let has_key = |keys: &[&str]| {
        villains
            .iter()
            .any(|v| keys.contains(&v.archetype_key.as_str()))
    };
    if has_key(&["calling_station", "overcaller_preflop"]) {
        recommendations.push(
            "Pool includes calling-station tendencies: trim air bluffs and shift value \
             sizing upward (about 60-100% pot) with top-pair+ hands."
                .to_string(),
        );
    }
    if has_key(&["nit", "weak_tight", "fit_or_fold", "overfolder_3bet"]) {
        recommendations.push(
            "Pool includes overfolders: increase frequent small stabs on dry boards and \
             pressure capped ranges on scare-card turns."
                .to_string(),
        );
    }
    if has_key(&["lag_reg", "maniac"]) {
        recommendations.push(
            "Aggressive villains present: defend more bluff-catchers and avoid low-equity \
             bluff-raises without strong blockers."
                .to_string(),
        );
    }
    if has_key(&["trappy"]) {
        recommendations.push(
            "Trappy profiles in pool: reduce auto-barrels on paired boards and protect \
             your checking range with medium-strength value."
                .to_string(),
        );
    }

    recommendations.push(format!(
        "Current villain mix ({}) has estimated {} fold rate of {:.1}%.",
        archetype_mix,
        scenario.street,
        avg_fold * 100.0
    ));

    if chosen.is_some_and(|row| row.action.is_aggressive()) {
        recommendations.push(format!(
            "At {:.2}x pot sizing, zero-equity bluff needs {:.1}% folds; polarized bluff \
             share target is {:.1}% (ratio {:.2}:1).",
            spot.bet_to_pot,
            spot.be_bluff_fold_freq * 100.0,
            spot.target_bluff_share * 100.0,
            spot.target_bluff_to_value_ratio
        ));
    }

    if blockers.signal_text != "blocker profile is neutral" {
        recommendations.push(format!("Blocker read: {}.", blockers.signal_text));
    } else {
        recommendations.push(
            "Blocker read is neutral; prioritize line selection by range/nut advantage \
             rather than pure blocker logic."
                .to_string(),
        );
    }

    if let (Some(best), Some(chosen)) = (best, chosen) {
        recommendations.push(format!(
            "Model best line is {} vs chosen {}; align future selections with that \
             sizing/intent profile in similar nodes.",
            best.label, chosen.label
        ));
    }

    recommendations.truncate(12);

    Ok(HeroAnalysis {
        hero_profile: hero.summary(),
        position_guidance: guidance,
        recommendations,
        opponent_snapshot: OpponentSnapshot {
            archetype_mix,
            average_street_fold_rate: crate::round(avg_fold, 4),
            players_in_hand: scenario.players_in_hand,
            texture_label,
        },
        spot_math: SpotDigest {
            required_equity: crate::round(spot.required_equity, 4),
            mdf: crate::round(spot.mdf, 4),
            spr: crate::round(spot.spr, 3),
            spr_label: spot.spr_label,
        },
    })
}

/// The full coaching artifact for one graded decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeakReport {
    pub summary: String,
    pub optimal_gap_bb: Utility,
    pub factor_breakdown: Vec<LeakFactor>,
    pub hero_profile_analysis: HeroAnalysis,
}

#[allow(clippy::too_many_arguments)]
fn build_leak_report(
    archetypes: &Archetypes,
    scenario: &Scenario,
    decision: &Decision,
    chosen: &ActionRow,
    best: &ActionRow,
    actions: &[ActionRow],
    ev_loss: Utility,
    simulations: usize,
) -> Result<LeakReport, Error> {
    let spot = spot_math(scenario, chosen.action, chosen.size_bb.unwrap_or(0.0));
    let texture = texture_score(scenario.board);
    let villains = scenario.active_villains();
    let archetype_mix = archetype_mix_summary(archetypes, &villains)?;
    let factors = factor_breakdown(
        archetypes, scenario, decision, chosen, best, actions, simulations,
    )?;
    let top_factor = factors
        .first()
        .map(|f| f.name.as_str())
        .unwrap_or("No significant leak factors");
    let summary = format!(
        "EV leak {:.3}bb in {} {} spot ({}-way, SPR {:.1}, {} board). \
         Pot-odds equity threshold {:.1}%, baseline MDF {:.1}%. \
         Best line: {} ({:.3}bb) vs chosen {} ({:.3}bb). \
         Primary driver: {}. Pool: {}.",
        ev_loss,
        scenario.street,
        scenario.hero_position,
        scenario.players_in_hand,
        spot.spr,
        TextureLabel::from(texture),
        spot.required_equity * 100.0,
        spot.mdf * 100.0,
        best.label,
        best.ev_bb,
        chosen.label,
        chosen.ev_bb,
        top_factor,
        archetype_mix
    );
    Ok(LeakReport {
        summary,
        optimal_gap_bb: crate::round(ev_loss, 3),
        factor_breakdown: factors,
        hero_profile_analysis: hero_profile_analysis(archetypes, scenario, Some(chosen), Some(best))?,
    })
}

/// Everything the caller gets back for one graded decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub scenario_id: String,
    pub best_action: ActionRow,
    pub chosen_action: ActionRow,
    pub ev_loss_bb: Utility,
    pub verdict: Verdict,
    pub mistake_tags: Vec<MistakeTag>,
    pub action_table: Vec<ActionRow>,
    pub leak_report: LeakReport,
}

/// Grade one decision: price the table (or reuse a precomputed one),
/// find the chosen row, and explain the gap to the best line.
pub fn evaluate_decision(
    archetypes: &Archetypes,
    scenario: &Scenario,
    decision: &Decision,
    simulations: usize,
    precomputed_actions: Option<&[ActionRow]>,
) -> Result<Evaluation, Error> {
    let actions: Vec<ActionRow> = match precomputed_actions {
        Some(rows) => rows.to_vec(),
        None => build_action_table(archetypes, scenario, simulations)?,
    };
    if actions.is_empty() {
        return Err(Error::NoLegalActions);
    }

    let best = actions[0].clone();
    let chosen = match find_row(&actions, decision) {
        Some(row) => row.clone(),
        None => {
            let (action, size_bb, intent) = decision.normalized();
            return Err(Error::ActionNotFound {
                action,
                size_bb,
                intent,
            });
        }
    };

    let ev_loss = crate::round(best.ev_bb - chosen.ev_bb, 3);
    let leak_report = build_leak_report(
        archetypes, scenario, decision, &chosen, &best, &actions, ev_loss, simulations,
    )?;

    Ok(Evaluation {
        scenario_id: scenario.scenario_id.clone(),
        verdict: Verdict::from(ev_loss),
        mistake_tags: mistake_tags(&chosen, &best, ev_loss),
        best_action: best,
        chosen_action: chosen,
        ev_loss_bb: ev_loss,
        action_table: actions,
        leak_report,
    })
}
