use super::preflop::preflop_strength;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Hole;
use crate::cards::Street;
use crate::cards::Strength;
use crate::error::Error;
use crate::profile::Archetype;
use crate::profile::Role;
use crate::Probability;
use rand::rngs::SmallRng;
use rand::Rng;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Current made-hand quality on a normalized scale of roughly [0, 1.3]:
/// the hand category plus a fraction of its leading tiebreaker.
/// Zero before the flop, where no made hand exists yet.
pub fn made_hand_score(hole: Hole, board: Hand) -> f64 {
    if board.size() < 3 {
        return 0.0;
    }
    let ranking = Strength::from(Hand::add(Hand::from(hole), board)).ranking();
    let category = ranking.category() as f64 / 8.0;
    let tiebreak = ranking.primary().value() as f64 / 14.0;
    category + 0.3 * tiebreak
}

/// Draw one villain hole via rejection sampling so that the draw
/// distribution reflects the archetype's range and the seat's role.
///
/// `pressure` in [0, 1]: higher means villain should be tighter to
/// still be in the pot. Each attempt draws two cards from a copy of
/// the deck and accepts with a sigmoid of (quality - target); after
/// 120 rejections the sampler gives up and returns a uniform pair,
/// which keeps loose targets from starving tight boards.
pub fn sample_villain_hand(
    deck: Deck,
    board: Hand,
    street: Street,
    archetype: &Archetype,
    role: Role,
    pressure: Probability,
    rng: &mut SmallRng,
) -> Result<Hole, Error> {
    if deck.size() < 2 {
        return Err(Error::InvalidInput(format!(
            "villain sampling requires 2 cards in the deck, got {}",
            deck.size()
        )));
    }

    let target = archetype.preflop_tightness
        + role.tightness_bonus()
        + pressure * 0.30
        - (archetype.bluff_factor - 0.4) * 0.15;

    for _ in 0..120 {
        let mut attempt = deck;
        let hole = attempt.hole(rng);
        let pre = preflop_strength(hole) / 100.0;
        let post = if street != Street::Pref {
            made_hand_score(hole, board)
        } else {
            0.0
        };
        let quality = 0.6 * pre + 0.4 * post;
        let accept = sigmoid((quality - target) * 7.0);
        if rng.random::<f64>() < accept {
            return Ok(hole);
        }
    }

    let mut fallback = deck;
    Ok(fallback.hole(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Archetypes;
    use rand::SeedableRng;

    fn deck_without(board: Hand) -> Deck {
        let mut deck = Deck::new();
        deck.exclude(board);
        deck
    }

    #[test]
    fn preflop_has_no_made_hand() {
        let hole = Hole::try_from("Ah Ad").unwrap();
        assert_eq!(made_hand_score(hole, Hand::empty()), 0.0);
    }

    #[test]
    fn made_hand_score_orders_categories() {
        let board = Hand::try_from("Ks 7d 2c").unwrap();
        let set = made_hand_score(Hole::try_from("Kh Kd").unwrap(), board);
        let pair = made_hand_score(Hole::try_from("Ah Kc").unwrap(), board);
        let air = made_hand_score(Hole::try_from("9h 4d").unwrap(), board);
        assert!(set > pair);
        assert!(pair > air);
    }

    #[test]
    fn sampled_hand_never_collides_with_board() {
        let archetypes = Archetypes::standard();
        let tag = archetypes.get("tag_reg").unwrap();
        let board = Hand::try_from("Ks 7d 2c").unwrap();
        let ref mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let hole = sample_villain_hand(
                deck_without(board),
                board,
                Street::Flop,
                tag,
                Role::Caller,
                0.4,
                rng,
            )
            .unwrap();
            let (a, b) = hole.cards();
            assert!(!board.contains(a));
            assert!(!board.contains(b));
        }
    }

    #[test]
    fn tight_archetypes_draw_stronger_hands() {
        let archetypes = Archetypes::standard();
        let nit = archetypes.get("nit").unwrap();
        let station = archetypes.get("calling_station").unwrap();
        let board = Hand::empty();
        let mean = |archetype: &Archetype, seed: u64| {
            let ref mut rng = SmallRng::seed_from_u64(seed);
            (0..400)
                .map(|_| {
                    let hole = sample_villain_hand(
                        Deck::new(),
                        board,
                        Street::Pref,
                        archetype,
                        Role::Waiting,
                        0.0,
                        rng,
                    )
                    .unwrap();
                    preflop_strength(hole)
                })
                .sum::<f64>()
                / 400.0
        };
        assert!(mean(nit, 11) > mean(station, 11));
    }

    #[test]
    fn empty_deck_is_rejected() {
        let mut deck = Deck::new();
        let ref mut rng = SmallRng::seed_from_u64(1);
        deck.deal(rng, 51);
        let result = sample_villain_hand(
            deck,
            Hand::empty(),
            Street::Pref,
            Archetypes::standard().get("tag_reg").unwrap(),
            Role::Waiting,
            0.0,
            rng,
        );
        assert!(result.is_err());
    }
}
