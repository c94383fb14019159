use leakscope::cards::Deck;
use leakscope::cards::Evaluator;
use leakscope::cards::Strength;
use leakscope::engine::build_action_table;
use leakscope::engine::ActionContext;
use leakscope::engine::ActionKind;
use leakscope::engine::NodeType;
use leakscope::engine::Scenario;
use leakscope::engine::Seat;
use leakscope::profile::Archetypes;
use leakscope::profile::HeroProfile;
use leakscope::profile::Position;
use leakscope::profile::Role;
use rand::rngs::SmallRng;
use rand::SeedableRng;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_seven_card_hand,
        pricing_action_table,
}

fn evaluating_seven_card_hand(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(2025);
    let hand = Deck::new().deal(rng, 7);
    c.bench_function("evaluate a 7-card Hand", |b| {
        b.iter(|| Strength::from(Evaluator::from(hand)))
    });
}

fn pricing_action_table(c: &mut criterion::Criterion) {
    let archetypes = Archetypes::standard();
    let scenario = facing_bet_scenario();
    c.bench_function("price a facing-bet action table", |b| {
        b.iter(|| build_action_table(&archetypes, &scenario, 200).unwrap())
    });
}

fn facing_bet_scenario() -> Scenario {
    let seat = |n: usize, position: Position, is_hero: bool, key: &str, role: Role| Seat {
        seat: n,
        position,
        is_hero,
        archetype_key: key.to_string(),
        stack_bb: 100.0,
        in_hand: true,
        role,
    };
    Scenario {
        scenario_id: "scn_bench".to_string(),
        seed: 7,
        street: leakscope::cards::Street::Flop,
        node_type: NodeType::SingleRaisedPot,
        action_context: ActionContext::FacingBet,
        hero_position: Position::BTN,
        hero_hole: "Ah Kh".try_into().unwrap(),
        board: "Kd 7s 2c".try_into().unwrap(),
        pot_bb: 10.0,
        to_call_bb: 5.0,
        effective_stack_bb: 95.0,
        players_in_hand: 3,
        legal_actions: vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
        bet_size_options_bb: vec![],
        raise_size_options_bb: vec![12.5, 16.0],
        seats: vec![
            seat(1, Position::SB, false, "calling_station", Role::Caller),
            seat(2, Position::CO, false, "tag_reg", Role::Bettor),
            seat(3, Position::BTN, true, "hero", Role::HeroToAct),
        ],
        hero_profile: HeroProfile::default(),
    }
}
