use super::action::ActionKind;
use crate::cards::Hand;
use crate::cards::Hole;
use crate::cards::Street;
use crate::error::Error;
use crate::profile::HeroProfile;
use crate::profile::Position;
use crate::profile::Role;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// How the preflop betting went before this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    SingleRaisedPot,
    ThreeBetPot,
    FourBetPot,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::SingleRaisedPot => write!(f, "single-raised pot"),
            Self::ThreeBetPot => write!(f, "3-bet pot"),
            Self::FourBetPot => write!(f, "4-bet pot"),
        }
    }
}

/// What hero is facing on the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionContext {
    CheckedToHero,
    FacingBet,
    FacingBetAndCall,
}

/// One seat at the table. Villains carry an archetype key resolved
/// against the injected registry at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub seat: usize,
    pub position: Position,
    pub is_hero: bool,
    pub archetype_key: String,
    pub stack_bb: Chips,
    pub in_hand: bool,
    pub role: Role,
}

/// An immutable snapshot of one decision point. Everything the
/// calculator needs is in here; evaluation never mutates it, and
/// counterfactuals work on copies with one field overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub seed: u64,
    pub street: Street,
    pub node_type: NodeType,
    pub action_context: ActionContext,
    pub hero_position: Position,
    pub hero_hole: Hole,
    pub board: Hand,
    pub pot_bb: Chips,
    pub to_call_bb: Chips,
    pub effective_stack_bb: Chips,
    pub players_in_hand: usize,
    pub legal_actions: Vec<ActionKind>,
    #[serde(default)]
    pub bet_size_options_bb: Vec<Chips>,
    #[serde(default)]
    pub raise_size_options_bb: Vec<Chips>,
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub hero_profile: HeroProfile,
}

impl Scenario {
    /// structural checks the calculator relies on
    pub fn validate(&self) -> Result<(), Error> {
        let expected = self.street.n_observed();
        if self.board.size() != expected {
            return Err(Error::InvalidInput(format!(
                "{} board must show {} cards, got {}",
                self.street,
                expected,
                self.board.size()
            )));
        }
        let hole = Hand::from(self.hero_hole);
        if Hand::add(hole, self.board).size() != hole.size() + self.board.size() {
            return Err(Error::InvalidInput(
                "hero hole cards overlap the board".to_string(),
            ));
        }
        if self.seats.iter().filter(|s| s.is_hero).count() != 1 {
            return Err(Error::InvalidInput(
                "scenario requires exactly one hero seat".to_string(),
            ));
        }
        if self.to_call_bb < 0.0 || self.pot_bb < 0.0 {
            return Err(Error::InvalidInput(
                "pot and to-call amounts must be nonnegative".to_string(),
            ));
        }
        Ok(())
    }

    /// seats still contesting the pot, hero excluded
    pub fn active_villains(&self) -> Vec<&Seat> {
        self.seats
            .iter()
            .filter(|s| s.in_hand && !s.is_hero)
            .collect()
    }

    pub fn is_legal(&self, action: ActionKind) -> bool {
        self.legal_actions.contains(&action)
    }

    /// hero hole plus board, the cards excluded from every deal
    pub fn known_cards(&self) -> Hand {
        Hand::add(Hand::from(self.hero_hole), self.board)
    }

    pub fn with_hero_profile(&self, hero_profile: HeroProfile) -> Self {
        Self {
            hero_profile,
            ..self.clone()
        }
    }

    pub fn with_hero_position(&self, hero_position: Position) -> Self {
        Self {
            hero_position,
            ..self.clone()
        }
    }
}
