use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use rand::rngs::SmallRng;
use rand::Rng;

/// The cards not yet seen. Constructed full, then narrowed by
/// removing dealt/assigned cards by value. Draws are uniform over
/// what remains and always take a caller-owned RNG so the whole
/// simulation stays reproducible from one seed.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl Deck {
    pub fn new() -> Self {
        Self(Hand::from(Hand::mask()))
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    /// remove a specific card from the deck
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }

    /// remove every card in the hand from the deck
    pub fn exclude(&mut self, hand: Hand) {
        for card in hand {
            self.remove(card);
        }
    }

    /// remove a uniformly random card from the deck
    pub fn draw(&mut self, rng: &mut SmallRng) -> Card {
        assert!(self.size() > 0);
        let i = rng.random_range(0..self.size());
        let mut bits = u64::from(self.0);
        for _ in 0..i {
            bits &= bits - 1;
        }
        let card = Card::from(bits.trailing_zeros() as u8);
        self.remove(card);
        card
    }

    /// remove two random cards to deal as a Hole
    pub fn hole(&mut self, rng: &mut SmallRng) -> Hole {
        let a = self.draw(rng);
        let b = self.draw(rng);
        Hole::try_from((a, b)).expect("deck draws are distinct")
    }

    /// remove n random cards from the deck
    pub fn deal(&mut self, rng: &mut SmallRng, n: usize) -> Hand {
        (0..n)
            .map(|_| self.draw(rng))
            .map(Hand::from)
            .fold(Hand::empty(), Hand::add)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}
