use crate::cards::Street;
use crate::error::Error;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A named, immutable bundle of behavioral frequencies describing
/// one opponent type. Never mutated after construction; the sampler
/// and continuation model read it to shape villain ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub key: String,
    pub label: String,
    pub description: String,
    pub vpip: Probability,
    pub pfr: Probability,
    pub af: f64,
    pub preflop_tightness: f64,
    pub fold_to_flop_bet: Probability,
    pub fold_to_turn_bet: Probability,
    pub fold_to_river_bet: Probability,
    pub fold_to_raise: Probability,
    pub continue_vs_raise: Probability,
    pub check_raise_rate: Probability,
    pub aggression: f64,
    pub bluff_factor: f64,
}

impl Archetype {
    /// street-specific fold-to-bet rate, defaulting to the
    /// fold-to-raise rate where no street field applies
    pub fn fold_to_bet(&self, street: Street) -> Probability {
        match street {
            Street::Flop => self.fold_to_flop_bet,
            Street::Turn => self.fold_to_turn_bet,
            Street::Rive => self.fold_to_river_bet,
            Street::Pref => self.fold_to_raise,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Process-wide read-only registry of archetypes, built once at
/// startup and injected into the engine by reference. Lookups are
/// by key and strict: an unknown key is the caller's bug.
#[derive(Debug, Clone, Default)]
pub struct Archetypes(BTreeMap<String, Archetype>);

impl Archetypes {
    pub fn get(&self, key: &str) -> Result<&Archetype, Error> {
        self.0
            .get(key)
            .ok_or_else(|| Error::InvalidInput(format!("unknown archetype: {}", key)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.0.values()
    }

    pub fn insert(&mut self, archetype: Archetype) {
        self.0.insert(archetype.key.clone(), archetype);
    }

    /// the standard pool of twelve opponent profiles
    pub fn standard() -> Self {
        let mut this = Self::default();
        for archetype in Self::table() {
            this.insert(archetype);
        }
        this
    }

    #[rustfmt::skip]
    fn table() -> Vec<Archetype> {
        let archetype = |key: &str,
                         label: &str,
                         description: &str,
                         stats: [f64; 12]| {
            let [vpip, pfr, af, preflop_tightness,
                 fold_to_flop_bet, fold_to_turn_bet, fold_to_river_bet,
                 fold_to_raise, continue_vs_raise, check_raise_rate,
                 aggression, bluff_factor] = stats;
            Archetype {
                key: key.to_string(),
                label: label.to_string(),
                description: description.to_string(),
                vpip, pfr, af, preflop_tightness,
                fold_to_flop_bet, fold_to_turn_bet, fold_to_river_bet,
                fold_to_raise, continue_vs_raise, check_raise_rate,
                aggression, bluff_factor,
            }
        };
        vec![
            archetype("nit", "Nit",
                "Very selective range, avoids high-variance spots.",
                [0.14, 0.11, 1.7, 0.82, 0.58, 0.62, 0.68, 0.63, 0.28, 0.06, 0.32, 0.24]),
            archetype("tag_reg", "TAG Reg",
                "Solid balanced player with disciplined ranges.",
                [0.22, 0.19, 2.6, 0.67, 0.44, 0.48, 0.53, 0.47, 0.43, 0.11, 0.56, 0.41]),
            archetype("lag_reg", "LAG Reg",
                "Wide ranges, frequent pressure and barreling.",
                [0.34, 0.27, 3.4, 0.46, 0.34, 0.39, 0.47, 0.39, 0.55, 0.17, 0.78, 0.67]),
            archetype("calling_station", "Loose-Passive Calling Station",
                "Calls too much, under-bluffs, hates folding pairs.",
                [0.46, 0.11, 1.1, 0.34, 0.23, 0.31, 0.42, 0.26, 0.71, 0.04, 0.21, 0.19]),
            archetype("maniac", "Maniac",
                "Extreme aggression and over-bluff frequency.",
                [0.52, 0.37, 4.4, 0.27, 0.28, 0.35, 0.43, 0.34, 0.62, 0.23, 0.91, 0.83]),
            archetype("weak_tight", "Weak-Tight",
                "Risk-averse and overfolds to sustained pressure.",
                [0.19, 0.13, 1.6, 0.73, 0.53, 0.61, 0.66, 0.58, 0.31, 0.05, 0.28, 0.22]),
            archetype("fit_or_fold", "Fit-or-Fold Flop Player",
                "Continues when connected; otherwise gives up quickly.",
                [0.26, 0.19, 2.0, 0.57, 0.59, 0.48, 0.50, 0.52, 0.36, 0.08, 0.44, 0.31]),
            archetype("one_and_done", "One-and-Done C-Bettor",
                "C-bets frequently but under-barrels on turns.",
                [0.24, 0.20, 2.2, 0.61, 0.42, 0.58, 0.59, 0.49, 0.40, 0.10, 0.53, 0.36]),
            archetype("trappy", "Trappy Slow-Player",
                "Slow-plays nutted hands and under-raises value.",
                [0.23, 0.16, 1.7, 0.64, 0.38, 0.43, 0.50, 0.44, 0.47, 0.13, 0.36, 0.27]),
            archetype("overfolder_3bet", "Overfolder vs 3-Bets",
                "Opens reasonable range but folds too often to reraises.",
                [0.25, 0.20, 2.1, 0.60, 0.43, 0.47, 0.52, 0.61, 0.33, 0.09, 0.49, 0.34]),
            archetype("overcaller_preflop", "Overcaller Preflop",
                "Calls preflop too wide and arrives postflop with dominated holdings.",
                [0.37, 0.16, 2.0, 0.45, 0.36, 0.45, 0.54, 0.41, 0.51, 0.10, 0.41, 0.29]),
            archetype("short_stack_jammer", "Short-Stack Jammer",
                "Lower SPR strategy with shove-heavy branches.",
                [0.29, 0.22, 3.0, 0.55, 0.32, 0.37, 0.46, 0.30, 0.64, 0.16, 0.74, 0.44]),
        ]
    }
}
