use super::rank::Rank;
use super::suit::Suit;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// A card is its (rank, suit) value. No identity beyond that:
/// dealing removes cards from the deck by value equality.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card maps to its position in a sorted 52-card deck
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism
/// each card is a single bit turned on
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self {
            rank: Rank::from((n.trailing_zeros() / 4) as u8),
            suit: Suit::from((n.trailing_zeros() % 4) as u8),
        }
    }
}

/// str isomorphism, e.g. "Ts"
impl TryFrom<&str> for Card {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => Ok(Self {
                rank: Rank::try_from(r)?,
                suit: Suit::try_from(u)?,
            }),
            _ => Err(Error::InvalidInput(format!("invalid card str: {}", s))),
        }
    }
}
impl TryFrom<String> for Card {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        let card = Card::try_from("Ts").unwrap();
        assert_eq!(card, Card::from(u8::from(card)));
    }

    #[test]
    fn bijective_u64() {
        let card = Card::try_from("Ah").unwrap();
        assert_eq!(card, Card::from(u64::from(card)));
    }

    #[test]
    fn bijective_str() {
        let card = Card::try_from("7d").unwrap();
        assert_eq!(card, Card::try_from(card.to_string()).unwrap());
    }

    #[test]
    fn rejects_malformed() {
        assert!(Card::try_from("Xx").is_err());
        assert!(Card::try_from("T").is_err());
        assert!(Card::try_from("Tss").is_err());
    }
}
