use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;
use crate::error::Error;
use std::cmp::Ordering;

/// A hand's total strength: Ranking first, Kickers to break ties.
///
/// Two distinct hands with identical rank structure (e.g. the same
/// flush in different suits) compare equal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    /// Rank the best 5-card hand within 5 to 7 distinct cards.
    ///
    /// A Hand is a set: listing the same card twice collapses it to
    /// one bit, so a 6-card listing with a duplicate arrives here as
    /// 5 distinct cards and evaluates rather than erroring.
    pub fn evaluate(hand: Hand) -> Result<Self, Error> {
        match hand.size() {
            5..=7 => Ok(Self::from(hand)),
            n => Err(Error::InvalidInput(format!(
                "hand evaluation requires 5 to 7 distinct cards, got {}",
                n
            ))),
        }
    }

    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }
}

/// Compare two 5-7 card hands by their best contained 5-card hand.
pub fn compare(a: Hand, b: Hand) -> Result<Ordering, Error> {
    Ok(Strength::evaluate(a)?.cmp(&Strength::evaluate(b)?))
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(evaluator: Evaluator) -> Self {
        let ranking = evaluator.find_ranking();
        let kickers = evaluator.find_kickers(ranking);
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18} {}", self.ranking, self.kickers)
    }
}
