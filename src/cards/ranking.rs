use super::rank::Rank;

/// A hand's category plus the ranks that define it. Kicker cards
/// are carried separately and used to break ties within a category.
/// The derived Ord is the standard poker order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 4 kickers
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    /// 0 = high card .. 8 = straight flush
    pub const fn category(&self) -> u8 {
        match self {
            Ranking::HighCard(_) => 0,
            Ranking::OnePair(_) => 1,
            Ranking::TwoPair(..) => 2,
            Ranking::ThreeOAK(_) => 3,
            Ranking::Straight(_) => 4,
            Ranking::Flush(_) => 5,
            Ranking::FullHouse(..) => 6,
            Ranking::FourOAK(_) => 7,
            Ranking::StraightFlush(_) => 8,
        }
    }

    /// the leading tiebreaker rank: the repeated rank for paired
    /// categories, the high card of the run for straights, the top
    /// card for flushes and high cards
    pub const fn primary(&self) -> Rank {
        match self {
            Ranking::HighCard(r)
            | Ranking::OnePair(r)
            | Ranking::ThreeOAK(r)
            | Ranking::Straight(r)
            | Ranking::Flush(r)
            | Ranking::FourOAK(r)
            | Ranking::StraightFlush(r)
            | Ranking::TwoPair(r, _)
            | Ranking::FullHouse(r, _) => *r,
        }
    }

    pub const fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) | Ranking::Flush(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(..) => 1,
            _ => 0,
        }
    }

    /// which ranks are NOT eligible to kick for this ranking
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => !(u16::from(hi) | u16::from(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi) => !u16::from(hi),
            Ranking::Flush(_) => !0,
            Ranking::FullHouse(..) | Ranking::Straight(..) | Ranking::StraightFlush(..) => {
                unreachable!("no kickers")
            }
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "High Card       {}", r),
            Ranking::OnePair(r) => write!(f, "Pair            {}", r),
            Ranking::TwoPair(r1, r2) => write!(f, "Two Pair        {}{}", r1, r2),
            Ranking::ThreeOAK(r) => write!(f, "Three of a Kind {}", r),
            Ranking::Straight(r) => write!(f, "Straight        {}", r),
            Ranking::Flush(r) => write!(f, "Flush           {}", r),
            Ranking::FullHouse(r1, r2) => write!(f, "Full House      {}{}", r1, r2),
            Ranking::FourOAK(r) => write!(f, "Four of a Kind  {}", r),
            Ranking::StraightFlush(r) => write!(f, "Straight Flush  {}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order() {
        assert!(Ranking::StraightFlush(Rank::Ace) > Ranking::FourOAK(Rank::Ace));
        assert!(Ranking::FourOAK(Rank::Two) > Ranking::FullHouse(Rank::Ace, Rank::King));
        assert!(Ranking::FullHouse(Rank::Two, Rank::Three) > Ranking::Flush(Rank::Ace));
        assert!(Ranking::Flush(Rank::Seven) > Ranking::Straight(Rank::Ace));
        assert!(Ranking::Straight(Rank::Five) > Ranking::ThreeOAK(Rank::Ace));
        assert!(Ranking::ThreeOAK(Rank::Two) > Ranking::TwoPair(Rank::Ace, Rank::King));
        assert!(Ranking::TwoPair(Rank::Two, Rank::Three) > Ranking::OnePair(Rank::Ace));
        assert!(Ranking::OnePair(Rank::Two) > Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn tiebreaks_within_category() {
        assert!(Ranking::TwoPair(Rank::Ace, Rank::Two) > Ranking::TwoPair(Rank::King, Rank::Queen));
        assert!(Ranking::Straight(Rank::Six) > Ranking::Straight(Rank::Five));
    }
}
