use crate::cards::Hole;

/// Heuristic 0-100 quality score for a two-card starting hand.
///
/// Not a lookup chart: a linear blend of high-card value, pairedness,
/// suitedness, and connectedness that orders starting hands well
/// enough to act as the acceptance signal for range sampling.
pub fn preflop_strength(hole: Hole) -> f64 {
    let (a, b) = hole.cards();
    let r1 = a.rank().value() as f64;
    let r2 = b.rank().value() as f64;
    let high = r1.max(r2);
    let low = r1.min(r2);

    let mut score = high * 3.0 + low * 2.0;
    if a.rank() == b.rank() {
        score += 24.0 + r1 * 1.5;
    }
    if a.suit() == b.suit() {
        score += 4.0;
    }
    match (r1 - r2).abs() as u8 {
        1 => score += 4.0,
        2 => score += 2.0,
        0 | 3 => {}
        _ => score -= 2.0,
    }
    if high >= 11.0 {
        score += 2.0;
    }
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(s: &str) -> f64 {
        preflop_strength(Hole::try_from(s).unwrap())
    }

    #[test]
    fn premium_pairs_top_the_ordering() {
        assert!(score("Ah Ad") > score("Kh Kd"));
        assert!(score("Kh Kd") > score("Ah Kh"));
        assert_eq!(score("Ah Ad"), 100.0);
    }

    #[test]
    fn suited_beats_offsuit() {
        assert!(score("Ah Kh") > score("Ah Kd"));
    }

    #[test]
    fn connectors_beat_gappers() {
        assert!(score("9h 8h") > score("9h 6h"));
        assert!(score("9h 7h") > score("9h 5h"));
    }

    #[test]
    fn trash_scores_low() {
        assert!(score("7h 2d") < 30.0);
    }
}
