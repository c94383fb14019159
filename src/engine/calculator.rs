use super::action::ActionKind;
use super::action::ActionRow;
use super::action::Decision;
use super::action::Intent;
use super::equity::EquityEstimate;
use super::scenario::Scenario;
use super::scenario::Seat;
use crate::cards::texture_score;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Street;
use crate::cards::Strength;
use crate::error::Error;
use crate::profile::Archetypes;
use crate::profile::Position;
use crate::profile::Role;
use crate::range::continue_probability;
use crate::range::sample_villain_hand;
use crate::Probability;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::HashMap;

/// stream offset so equity draws never collide with upstream
/// consumers of the same scenario seed
const SEED_OFFSET: u64 = 173;

/// Equity runs are memoized per (hero cards, board, street, villain
/// lineup, pressure, sample count) because the action table prices
/// many rows against identical range configurations.
type EquityKey = (
    u64,
    u64,
    Street,
    Vec<(String, Role, Position)>,
    i64,
    usize,
);

/// Prices every legal line of one scenario.
///
/// Owns the RNG stream (seeded from the scenario) and the equity
/// cache; the scenario and archetype registry are borrowed and never
/// mutated, so counterfactual reruns just build a fresh calculator
/// over a modified copy.
pub struct Calculator<'a> {
    archetypes: &'a Archetypes,
    scenario: &'a Scenario,
    simulations: usize,
    rng: SmallRng,
    cache: HashMap<EquityKey, EquityEstimate>,
}

impl<'a> Calculator<'a> {
    pub fn new(
        archetypes: &'a Archetypes,
        scenario: &'a Scenario,
        simulations: usize,
    ) -> Result<Self, Error> {
        scenario.validate()?;
        Ok(Self {
            archetypes,
            scenario,
            simulations: simulations.clamp(120, 2400),
            rng: SmallRng::seed_from_u64(scenario.seed.wrapping_add(SEED_OFFSET)),
            cache: HashMap::new(),
        })
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Showdown equity versus the given villains, whose holdings are
    /// drawn from their archetype ranges each trial. Ties split the
    /// pot evenly among the tied hands.
    fn equity(
        &mut self,
        villains: &[&Seat],
        pressure: Probability,
        samples: Option<usize>,
    ) -> Result<EquityEstimate, Error> {
        if villains.is_empty() {
            return Ok(EquityEstimate::certain());
        }
        let scenario = self.scenario;
        let n = samples.unwrap_or(self.simulations);
        let key = (
            u64::from(Hand::from(scenario.hero_hole)),
            u64::from(scenario.board),
            scenario.street,
            villains
                .iter()
                .map(|v| (v.archetype_key.clone(), v.role, v.position))
                .collect(),
            (pressure * 1000.0).round() as i64,
            n,
        );
        if let Some(hit) = self.cache.get(&key) {
            return Ok(*hit);
        }

        log::debug!(
            "equity: {} trials vs {} villains at pressure {:.2}",
            n,
            villains.len(),
            pressure
        );

        let mut base = Deck::new();
        base.exclude(scenario.known_cards());
        let missing = 5 - scenario.board.size();
        let hero = Hand::from(scenario.hero_hole);

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let mut deck = base;
            let mut holes = Vec::with_capacity(villains.len());
            for villain in villains {
                let archetype = self.archetypes.get(&villain.archetype_key)?;
                let hole = sample_villain_hand(
                    deck,
                    scenario.board,
                    scenario.street,
                    archetype,
                    villain.role,
                    pressure,
                    &mut self.rng,
                )?;
                deck.exclude(Hand::from(hole));
                holes.push(hole);
            }
            let runout = deck.deal(&mut self.rng, missing);
            let full_board = Hand::add(scenario.board, runout);
            let hero_strength = Strength::from(Hand::add(hero, full_board));

            let mut tied = 1usize;
            let mut beaten = false;
            for hole in &holes {
                let villain = Strength::from(Hand::add(Hand::from(*hole), full_board));
                match villain.cmp(&hero_strength) {
                    Ordering::Greater => {
                        beaten = true;
                        break;
                    }
                    Ordering::Equal => tied += 1,
                    Ordering::Less => {}
                }
            }
            let share = if beaten { 0.0 } else { 1.0 / tied as f64 };
            sum += share;
            sum_sq += share * share;
        }

        let equity = sum / n as f64;
        let variance = (sum_sq / n as f64 - equity * equity).max(0.0);
        let estimate = EquityEstimate {
            equity,
            stderr: (variance / n as f64).sqrt(),
        };
        self.cache.insert(key, estimate);
        Ok(estimate)
    }

    /// How much of its raw equity this line cashes out: position,
    /// street, intent, multiway drag, and hero's own stat profile.
    fn line_realization(&self, intent: Option<Intent>, callers_estimate: f64) -> f64 {
        let hero = &self.scenario.hero_profile;
        let base = 0.82 + self.scenario.hero_position.realization_bonus();
        let street_adj = self.scenario.street.realization_shift();
        let intent_adj = match intent {
            Some(Intent::Value) => 0.08,
            Some(Intent::Bluff) => -0.08,
            None => 0.0,
        };
        let multiway_adj = -0.04 * (callers_estimate - 1.0).max(0.0);
        let gap_penalty = -(hero.vpip_pfr_gap() - 0.10).max(0.0) * 0.28;
        let af_bluff_penalty = match intent {
            Some(Intent::Bluff) => -(hero.af() - 3.8).max(0.0) * 0.025,
            _ => 0.0,
        };
        let pfr_bonus = (hero.pfr() - 0.20).max(0.0) * 0.08;
        (base + street_adj + intent_adj + multiway_adj + gap_penalty + af_bluff_penalty + pfr_bonus)
            .clamp(0.45, 1.05)
    }

    /// Villains call looser against a bluffy image and tighter
    /// against a nitty one; positive means more continues.
    fn hero_image_continue_adjustment(&self, intent: Intent) -> f64 {
        let image = self.scenario.hero_profile.image_bluffiness();
        match intent {
            Intent::Bluff => (image - 0.5) * 0.22,
            Intent::Value => (image - 0.5) * 0.12,
        }
    }

    fn fold_row(&self) -> ActionRow {
        ActionRow {
            action: ActionKind::Fold,
            size_bb: None,
            intent: None,
            label: "Fold".to_string(),
            equity: 0.0,
            fold_equity: 0.0,
            expected_callers: self.scenario.active_villains().len() as f64,
            pot_if_called_bb: self.scenario.pot_bb,
            risk_bb: 0.0,
            realization: 0.0,
            ev_bb: 0.0,
            ev_ci_bb: 0.0,
        }
    }

    /// Passive lines: realize equity in a pot that keeps growing on
    /// later streets, minus a future-cost drag for playing them out.
    fn call_like(&mut self, action: ActionKind) -> Result<ActionRow, Error> {
        let scenario = self.scenario;
        let pot = scenario.pot_bb;
        let to_call = scenario.to_call_bb;
        let villains = scenario.active_villains();

        let equity = self.equity(&villains, 0.30, None)?;
        let realization = self.line_realization(None, villains.len() as f64);
        let ff = scenario.street.future_factor();

        let (label, expected_pot, ev, risk) = if action == ActionKind::Check {
            let expected_pot = pot * ff;
            let future_cost = (ff - 1.0) * pot * 0.11;
            let ev = equity.equity * realization * expected_pot - future_cost;
            ("Check", expected_pot, ev, 0.0)
        } else {
            let expected_pot = (pot + to_call) * ff;
            let future_cost = (ff - 1.0) * (pot + to_call) * 0.14;
            let ev = equity.equity * realization * expected_pot - to_call - future_cost;
            ("Call", expected_pot, ev, to_call)
        };

        let ci = 1.96 * equity.stderr * expected_pot * realization;
        Ok(ActionRow {
            action,
            size_bb: None,
            intent: None,
            label: label.to_string(),
            equity: crate::round(equity.equity, 4),
            fold_equity: 0.0,
            expected_callers: villains.len() as f64,
            pot_if_called_bb: crate::round(expected_pot, 2),
            risk_bb: crate::round(risk, 2),
            realization: crate::round(realization, 3),
            ev_bb: crate::round(ev, 3),
            ev_ci_bb: crate::round(ci, 3),
        })
    }

    /// Bets and raises: fold-chain EV plus showdown EV against the
    /// most likely continuing subset, with sanity penalties for
    /// mislabeled intents.
    fn aggressive(
        &mut self,
        action: ActionKind,
        size_bb: f64,
        intent: Intent,
    ) -> Result<ActionRow, Error> {
        let scenario = self.scenario;
        let pot = scenario.pot_bb;
        let to_call = scenario.to_call_bb;
        let villains = scenario.active_villains();

        let size_ratio = size_bb / pot.max(1.0);
        let texture = texture_score(scenario.board);
        let texture_adj = match intent {
            Intent::Bluff if texture >= 1.5 => -0.03,
            Intent::Bluff => 0.03,
            Intent::Value => 0.0,
        };
        let image_adj = self.hero_image_continue_adjustment(intent);

        let mut continue_probs: Vec<(&Seat, f64)> = Vec::with_capacity(villains.len());
        for villain in &villains {
            let archetype = self.archetypes.get(&villain.archetype_key)?;
            let p = continue_probability(
                archetype,
                scenario.street,
                action,
                size_ratio,
                villain.role,
            )?;
            continue_probs.push((*villain, (p + texture_adj + image_adj).clamp(0.03, 0.97)));
        }

        let p_all_fold: f64 = continue_probs.iter().map(|(_, p)| 1.0 - p).product();
        let expected_callers: f64 = continue_probs.iter().map(|(_, p)| *p).sum();

        // price equity against the villains most likely to continue
        let target_callers = (expected_callers.round() as usize).clamp(1, villains.len().max(1));
        let mut by_continue = continue_probs.clone();
        by_continue.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let callers_for_equity: Vec<&Seat> = by_continue
            .iter()
            .take(target_callers)
            .map(|(v, _)| *v)
            .collect();
        let pressure = (0.38 + size_ratio * 0.25).clamp(0.25, 0.95);
        let equity = self.equity(&callers_for_equity, pressure, None)?;

        let realization = self.line_realization(Some(intent), expected_callers.max(1.0));

        let pot_if_called = if action == ActionKind::Bet {
            pot + size_bb + expected_callers * size_bb
        } else {
            pot + size_bb + expected_callers * (size_bb - to_call).max(0.0)
        };
        let risk = size_bb;

        let mut ev = p_all_fold * pot
            + (1.0 - p_all_fold) * (equity.equity * realization * pot_if_called - risk);
        if intent == Intent::Value && equity.equity < 0.45 {
            ev -= 0.7;
        }
        if intent == Intent::Bluff && equity.equity > 0.58 {
            ev -= 0.4;
        }

        let ci = 1.96 * equity.stderr * pot_if_called * realization;
        let verb = if action == ActionKind::Bet { "Bet" } else { "Raise" };
        Ok(ActionRow {
            action,
            size_bb: Some(crate::round(size_bb, 2)),
            intent: Some(intent),
            label: format!("{} {:.1}bb ({})", verb, size_bb, intent.title()),
            equity: crate::round(equity.equity, 4),
            fold_equity: crate::round(p_all_fold, 4),
            expected_callers: crate::round(expected_callers, 3),
            pot_if_called_bb: crate::round(pot_if_called, 2),
            risk_bb: crate::round(risk, 2),
            realization: crate::round(realization, 3),
            ev_bb: crate::round(ev, 3),
            ev_ci_bb: crate::round(ci, 3),
        })
    }

    /// Every legal line, priced and sorted best-first.
    pub fn action_table(&mut self) -> Result<Vec<ActionRow>, Error> {
        let scenario = self.scenario;
        let mut table = Vec::new();

        if scenario.is_legal(ActionKind::Fold) {
            table.push(self.fold_row());
        }
        if scenario.is_legal(ActionKind::Check) {
            table.push(self.call_like(ActionKind::Check)?);
        }
        if scenario.is_legal(ActionKind::Call) {
            table.push(self.call_like(ActionKind::Call)?);
        }
        if scenario.is_legal(ActionKind::Bet) {
            for &size in &scenario.bet_size_options_bb {
                for intent in [Intent::Value, Intent::Bluff] {
                    table.push(self.aggressive(ActionKind::Bet, size, intent)?);
                }
            }
        }
        if scenario.is_legal(ActionKind::Raise) {
            for &size in &scenario.raise_size_options_bb {
                for intent in [Intent::Value, Intent::Bluff] {
                    table.push(self.aggressive(ActionKind::Raise, size, intent)?);
                }
            }
        }

        if table.is_empty() {
            return Err(Error::NoLegalActions);
        }
        table.sort_by(|a, b| b.ev_bb.partial_cmp(&a.ev_bb).unwrap_or(Ordering::Equal));
        Ok(table)
    }

    /// Price exactly one decision without building the whole table.
    /// Counterfactual reruns use this to keep re-evaluation cheap.
    pub fn evaluate_choice(&mut self, decision: &Decision) -> Result<ActionRow, Error> {
        let (action, size_bb, intent) = decision.normalized();
        if !self.scenario.is_legal(action) {
            return Err(Error::ActionNotFound {
                action,
                size_bb,
                intent,
            });
        }
        match action {
            ActionKind::Fold => Ok(self.fold_row()),
            ActionKind::Check | ActionKind::Call => self.call_like(action),
            ActionKind::Bet | ActionKind::Raise => {
                let size = size_bb.ok_or(Error::ActionNotFound {
                    action,
                    size_bb,
                    intent,
                })?;
                self.aggressive(action, size, intent.unwrap_or(Intent::Value))
            }
        }
    }
}

/// Find the table row pricing a decision, if any.
pub fn find_row<'t>(table: &'t [ActionRow], decision: &Decision) -> Option<&'t ActionRow> {
    table.iter().find(|row| row.matches(decision))
}

/// Price every legal line of a scenario, best-first.
pub fn build_action_table(
    archetypes: &Archetypes,
    scenario: &Scenario,
    simulations: usize,
) -> Result<Vec<ActionRow>, Error> {
    Calculator::new(archetypes, scenario, simulations)?.action_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hole;
    use crate::engine::scenario::ActionContext;
    use crate::engine::scenario::NodeType;
    use crate::profile::HeroProfile;

    fn seat(n: usize, position: Position, is_hero: bool, key: &str, role: Role) -> Seat {
        Seat {
            seat: n,
            position,
            is_hero,
            archetype_key: key.to_string(),
            stack_bb: 100.0,
            in_hand: true,
            role,
        }
    }

    fn facing_bet_scenario() -> Scenario {
        Scenario {
            scenario_id: "scn_calc".to_string(),
            seed: 99,
            street: Street::Flop,
            node_type: NodeType::SingleRaisedPot,
            action_context: ActionContext::FacingBet,
            hero_position: Position::BTN,
            hero_hole: Hole::try_from("Ah Kh").unwrap(),
            board: Hand::try_from("Kd 7s 2c").unwrap(),
            pot_bb: 10.0,
            to_call_bb: 5.0,
            effective_stack_bb: 95.0,
            players_in_hand: 2,
            legal_actions: vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
            bet_size_options_bb: vec![],
            raise_size_options_bb: vec![15.0],
            seats: vec![
                seat(1, Position::CO, false, "tag_reg", Role::Bettor),
                seat(2, Position::BTN, true, "hero", Role::HeroToAct),
            ],
            hero_profile: HeroProfile::default(),
        }
    }

    fn checked_to_scenario() -> Scenario {
        let mut s = facing_bet_scenario();
        s.action_context = ActionContext::CheckedToHero;
        s.to_call_bb = 0.0;
        s.legal_actions = vec![ActionKind::Check, ActionKind::Bet];
        s.bet_size_options_bb = vec![3.3, 5.0, 7.5];
        s.raise_size_options_bb = vec![];
        s.seats[0].role = Role::Waiting;
        s
    }

    fn archetypes() -> Archetypes {
        Archetypes::standard()
    }

    #[test]
    fn table_is_sorted_best_first() {
        let archetypes = archetypes();
        let table = build_action_table(&archetypes, &facing_bet_scenario(), 150).unwrap();
        for pair in table.windows(2) {
            assert!(pair[0].ev_bb >= pair[1].ev_bb);
        }
    }

    #[test]
    fn table_covers_every_legal_line() {
        let archetypes = archetypes();
        let table = build_action_table(&archetypes, &checked_to_scenario(), 150).unwrap();
        // check + 3 sizes x 2 intents
        assert_eq!(table.len(), 7);
        assert!(table.iter().any(|r| r.action == ActionKind::Check));
        assert!(!table.iter().any(|r| r.action == ActionKind::Fold));
    }

    #[test]
    fn fold_row_is_zero_ev() {
        let archetypes = archetypes();
        let table = build_action_table(&archetypes, &facing_bet_scenario(), 150).unwrap();
        let fold = find_row(&table, &Decision::new(ActionKind::Fold)).unwrap();
        assert_eq!(fold.ev_bb, 0.0);
        assert_eq!(fold.risk_bb, 0.0);
        assert_eq!(fold.equity, 0.0);
    }

    #[test]
    fn same_seed_same_table() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        let a = build_action_table(&archetypes, &scenario, 200).unwrap();
        let b = build_action_table(&archetypes, &scenario, 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn top_pair_top_kicker_beats_folding() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        let table = build_action_table(&archetypes, &scenario, 400).unwrap();
        let call = find_row(&table, &Decision::new(ActionKind::Call)).unwrap();
        assert!(call.equity > 0.5, "got equity {}", call.equity);
        assert!(call.ev_bb > 0.0);
        assert_ne!(table[0].action, ActionKind::Fold);
    }

    #[test]
    fn uncontested_pot_has_certain_equity() {
        let archetypes = archetypes();
        let mut scenario = facing_bet_scenario();
        scenario.seats[0].in_hand = false;
        scenario.to_call_bb = 0.0;
        scenario.legal_actions = vec![ActionKind::Check];
        let table = build_action_table(&archetypes, &scenario, 150).unwrap();
        let check = find_row(&table, &Decision::new(ActionKind::Check)).unwrap();
        assert_eq!(check.equity, 1.0);
        assert_eq!(check.ev_ci_bb, 0.0);
        assert_eq!(check.expected_callers, 0.0);
        assert!(check.ev_bb > 0.0);
    }

    #[test]
    fn evaluate_choice_matches_table_row() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        let table = build_action_table(&archetypes, &scenario, 200).unwrap();
        let decision = Decision::sized(ActionKind::Raise, 15.0, Intent::Value);
        let from_table = find_row(&table, &decision).unwrap();
        let mut calc = Calculator::new(&archetypes, &scenario, 200).unwrap();
        let direct = calc.evaluate_choice(&decision).unwrap();
        assert_eq!(direct.action, from_table.action);
        assert_eq!(direct.size_bb, from_table.size_bb);
        assert_eq!(direct.intent, from_table.intent);
    }

    #[test]
    fn illegal_action_is_not_found() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        let mut calc = Calculator::new(&archetypes, &scenario, 150).unwrap();
        let result = calc.evaluate_choice(&Decision::new(ActionKind::Check));
        assert!(matches!(result, Err(Error::ActionNotFound { .. })));
    }

    #[test]
    fn sized_action_requires_a_size() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        let mut calc = Calculator::new(&archetypes, &scenario, 150).unwrap();
        let result = calc.evaluate_choice(&Decision::new(ActionKind::Raise));
        assert!(matches!(result, Err(Error::ActionNotFound { .. })));
    }

    #[test]
    fn no_legal_actions_is_an_error() {
        let archetypes = archetypes();
        let mut scenario = facing_bet_scenario();
        scenario.legal_actions.clear();
        let result = build_action_table(&archetypes, &scenario, 150);
        assert!(matches!(result, Err(Error::NoLegalActions)));
    }

    #[test]
    fn simulations_are_clamped() {
        let archetypes = archetypes();
        let scenario = facing_bet_scenario();
        assert_eq!(Calculator::new(&archetypes, &scenario, 1).unwrap().simulations(), 120);
        let calc = Calculator::new(&archetypes, &scenario, 1_000_000).unwrap();
        assert_eq!(calc.simulations(), 2400);
    }

    #[test]
    fn unknown_archetype_key_fails() {
        let archetypes = archetypes();
        let mut scenario = facing_bet_scenario();
        scenario.seats[0].archetype_key = "gto_wizard".to_string();
        let result = build_action_table(&archetypes, &scenario, 150);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
