use crate::Chips;
use crate::Probability;
use crate::Utility;
use serde::Deserialize;
use serde::Serialize;

/// The five things hero can do at a decision node.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
            Self::Raise => write!(f, "raise"),
        }
    }
}

/// Why an aggressive line is taken. Every bet and raise in the table
/// is priced twice, once per intent, because realization and the
/// equity sanity penalties differ between them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Value,
    Bluff,
}

impl Intent {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::Bluff => "Bluff",
        }
    }

    pub const fn other(&self) -> Self {
        match self {
            Self::Value => Self::Bluff,
            Self::Bluff => Self::Value,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Bluff => write!(f, "bluff"),
        }
    }
}

/// What hero actually did: an action, optionally a size, optionally
/// an intent. Matching against table rows happens on the normalized
/// form so 7.49bb and 7.5bb resolve to the same row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionKind,
    #[serde(default)]
    pub size_bb: Option<Chips>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

impl Decision {
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            size_bb: None,
            intent: None,
        }
    }

    pub fn sized(action: ActionKind, size_bb: Chips, intent: Intent) -> Self {
        Self {
            action,
            size_bb: Some(size_bb),
            intent: Some(intent),
        }
    }

    /// sizes at or below zero collapse to "no size";
    /// the rest round to one decimal of a big blind
    pub fn normalized(&self) -> (ActionKind, Option<f64>, Option<Intent>) {
        let size = match self.size_bb {
            Some(s) if s > 0.0 => Some(crate::round(s, 1)),
            _ => None,
        };
        (self.action, size, self.intent)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.action)?;
        if let Some(size) = self.size_bb {
            write!(f, " {:.1}bb", size)?;
        }
        if let Some(intent) = self.intent {
            write!(f, " ({})", intent.title())?;
        }
        Ok(())
    }
}

/// One fully priced line in the action table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    pub action: ActionKind,
    pub size_bb: Option<Chips>,
    pub intent: Option<Intent>,
    pub label: String,
    pub equity: Probability,
    pub fold_equity: Probability,
    pub expected_callers: f64,
    pub pot_if_called_bb: Chips,
    pub risk_bb: Chips,
    pub realization: f64,
    pub ev_bb: Utility,
    pub ev_ci_bb: Utility,
}

impl ActionRow {
    /// does this row price the given decision?
    pub fn matches(&self, decision: &Decision) -> bool {
        let (action, size, intent) = decision.normalized();
        let row_size = self.size_bb.map(|s| crate::round(s, 1));
        self.action == action && row_size == size && self.intent == intent
    }

    /// the decision this row prices, for counterfactual reruns
    pub fn decision(&self) -> Decision {
        Decision {
            action: self.action,
            size_bb: self.size_bb,
            intent: self.intent,
        }
    }
}
