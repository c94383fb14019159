use super::card::Card;
use super::suit::Suit;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// An unordered set of Cards stored as the 52 LSBs of a u64,
/// one bit per unique card. Set union, removal, and per-suit
/// projection are single bitwise ops, and duplicates are
/// unrepresentable by construction.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Hand(u64);

impl Hand {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn add(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }

    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: Card) -> bool {
        self.0 & u64::from(card) != 0
    }
    pub fn of(&self, suit: &Suit) -> Hand {
        Self(self.0 & u64::from(*suit))
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    /// collapse to a 13-bit rank mask, losing suit information
    pub fn ranks(&self) -> u16 {
        (*self)
            .into_iter()
            .map(|card| u16::from(card.rank()))
            .fold(0, |a, b| a | b)
    }

    pub const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// empties the hand from low to high card
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.size() == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, b| a | b))
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.into_iter().collect()
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// str isomorphism, whitespace separated: "Ah Kd Qs"
impl TryFrom<&str> for Hand {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, Error>>()
            .map(Self::from)
    }
}
impl TryFrom<String> for Hand {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Hand> for String {
    fn from(h: Hand) -> Self {
        h.to_string()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut cards = self.into_iter();
        if let Some(card) = cards.next() {
            write!(f, "{}", card)?;
        }
        for card in cards {
            write!(f, " {}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u64() {
        let hand = Hand::try_from("2c Ts Jc Js").unwrap();
        assert_eq!(hand, Hand::from(u64::from(hand)));
    }

    #[test]
    fn bijective_str() {
        let hand = Hand::try_from("2c Ts Jc Js").unwrap();
        assert_eq!(hand, Hand::try_from(hand.to_string()).unwrap());
    }

    #[test]
    fn card_iteration() {
        let mut iter = Hand::try_from("Jc Ts 2c Js").unwrap().into_iter();
        assert_eq!(iter.next(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Ts").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Jc").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Js").unwrap()));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn duplicates_collapse() {
        let hand = Hand::try_from("Ah Ah Kd").unwrap();
        assert_eq!(hand.size(), 2);
    }

    #[test]
    fn ranks_in_suit() {
        let hand = Hand::try_from("2c 6c Tc Ac 3d").unwrap();
        assert_eq!(hand.of(&Suit::Club).size(), 4);
        assert_eq!(hand.of(&Suit::Diamond).size(), 1);
        assert_eq!(hand.of(&Suit::Spade).size(), 0);
    }
}
