use super::card::Card;
use super::hand::Hand;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// Exactly two distinct cards.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Hole(Hand);

impl Hole {
    pub fn cards(&self) -> (Card, Card) {
        let mut iter = self.0.into_iter();
        match (iter.next(), iter.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => unreachable!("Hole always holds two cards"),
        }
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<Hand> for Hole {
    type Error = Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            2 => Ok(Self(hand)),
            n => Err(Error::InvalidInput(format!(
                "hole requires 2 distinct cards, got {}",
                n
            ))),
        }
    }
}

impl TryFrom<(Card, Card)> for Hole {
    type Error = Error;
    fn try_from(cards: (Card, Card)) -> Result<Self, Self::Error> {
        Self::try_from(Hand::add(Hand::from(cards.0), Hand::from(cards.1)))
    }
}

impl TryFrom<&str> for Hole {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(Hand::try_from(s)?)
    }
}
impl TryFrom<String> for Hole {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Hole> for String {
    fn from(hole: Hole) -> Self {
        hole.0.to_string()
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_cards() {
        assert!(Hole::try_from("Ah Kd").is_ok());
        assert!(Hole::try_from("Ah Ah").is_err());
        assert!(Hole::try_from("Ah Kd Qs").is_err());
    }
}
