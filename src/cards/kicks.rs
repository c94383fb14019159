use super::rank::Rank;

/// A hand's kicker cards as a 13-bit rank mask.
///
/// For two hands of the same Ranking the kicker counts are equal,
/// so comparing the raw masks is exactly descending lexicographic
/// comparison of the kicker ranks.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n)
    }
}

impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13)
            .rev()
            .filter(|i| k.0 & (1 << i) != 0)
            .map(|i| Rank::from(i as u8))
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_order() {
        let kickers = Kickers::from(vec![Rank::Two, Rank::Ace, Rank::Ten]);
        assert_eq!(
            Vec::<Rank>::from(kickers),
            vec![Rank::Ace, Rank::Ten, Rank::Two]
        );
    }

    #[test]
    fn mask_compare_is_lexicographic() {
        let high = Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack]);
        let low = Kickers::from(vec![Rank::King, Rank::Seven, Rank::Six]);
        assert!(high > low);
    }
}
