use super::hand::Hand;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;

/// Rough board wetness score; higher means wetter.
///
/// Sums a flush-draw term (cards of the dominant suit beyond two),
/// a connectivity term (adjacent rank gaps of two or less), and a
/// paired-board term. Boards shorter than a flop score 0.
pub fn texture_score(board: Hand) -> f64 {
    if board.size() < 3 {
        return 0.0;
    }
    let ranks = board
        .into_iter()
        .map(|c| c.rank().value() as i32)
        .collect::<Vec<i32>>();
    let max_suit = Suit::all()
        .into_iter()
        .map(|s| board.of(&s).size())
        .max()
        .unwrap_or(0);
    let connected = ranks
        .windows(2)
        .filter(|w| (w[0] - w[1]).abs() <= 2)
        .count();
    let paired = (board.ranks().count_ones() as usize) < board.size();
    let mut texture = 0.0;
    texture += 0.9 * max_suit.saturating_sub(2) as f64;
    texture += 0.6 * connected as f64;
    texture += if paired { 0.8 } else { 0.0 };
    texture
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextureLabel {
    Dry,
    SemiWet,
    Wet,
}

impl TextureLabel {
    /// title-case form for prose that starts a sentence with the label
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::SemiWet => "Semi-Wet",
            Self::Wet => "Wet",
        }
    }
}

impl From<f64> for TextureLabel {
    fn from(texture: f64) -> Self {
        if texture < 0.7 {
            Self::Dry
        } else if texture < 1.6 {
            Self::SemiWet
        } else {
            Self::Wet
        }
    }
}

impl std::fmt::Display for TextureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Dry => write!(f, "dry"),
            Self::SemiWet => write!(f, "semi-wet"),
            Self::Wet => write!(f, "wet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn short_boards_score_zero() {
        assert_eq!(texture_score(Hand::empty()), 0.0);
        assert_eq!(texture_score(board("Ah Kd")), 0.0);
    }

    #[test]
    fn monotone_connected_is_wet() {
        let wet = texture_score(board("9h 8h 7h"));
        assert!(wet >= 1.6, "got {}", wet);
        assert_eq!(TextureLabel::from(wet), TextureLabel::Wet);
    }

    #[test]
    fn rainbow_disconnected_is_dry() {
        let dry = texture_score(board("Ah 8d 2c"));
        assert!(dry < 0.7, "got {}", dry);
        assert_eq!(TextureLabel::from(dry), TextureLabel::Dry);
    }

    #[test]
    fn paired_board_adds_weight() {
        let unpaired = texture_score(board("Ah 8d 2c"));
        let paired = texture_score(board("Ah 8d 8c"));
        assert!(paired > unpaired);
    }
}
