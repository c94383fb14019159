use super::position::Position;
use crate::cards::Street;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// Hero's own normalized statistics. Values arrive from tracking
/// tools as either rates or percents; both are accepted and every
/// field is clamped to its valid range at construction, so the
/// engine never sees an out-of-range or infinite stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHeroProfile")]
pub struct HeroProfile {
    vpip: Probability,
    pfr: Probability,
    af: f64,
    three_bet: Probability,
    fold_to_3bet: Probability,
}

/// wire shape: all fields optional, percent-style inputs allowed
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct RawHeroProfile {
    pub vpip: Option<f64>,
    pub pfr: Option<f64>,
    pub af: Option<f64>,
    pub three_bet: Option<f64>,
    pub fold_to_3bet: Option<f64>,
}

fn normalize_rate(raw: Option<f64>, default: f64) -> Probability {
    match raw {
        None => default,
        Some(value) => {
            let value = if value > 1.0 { value / 100.0 } else { value };
            value.clamp(0.0, 1.0)
        }
    }
}

impl From<RawHeroProfile> for HeroProfile {
    fn from(raw: RawHeroProfile) -> Self {
        Self {
            vpip: normalize_rate(raw.vpip, 0.30),
            pfr: normalize_rate(raw.pfr, 0.22),
            // unbounded aggression collapses to a finite sentinel
            af: raw.af.unwrap_or(2.8).clamp(0.4, 8.0),
            three_bet: normalize_rate(raw.three_bet, 0.09),
            fold_to_3bet: normalize_rate(raw.fold_to_3bet, 0.54),
        }
    }
}

impl Default for HeroProfile {
    fn default() -> Self {
        Self::from(RawHeroProfile::default())
    }
}

impl HeroProfile {
    /// the fixed reference profile counterfactual reruns evaluate under
    pub fn neutral() -> Self {
        Self {
            vpip: 0.24,
            pfr: 0.19,
            af: 2.3,
            three_bet: 0.08,
            fold_to_3bet: 0.56,
        }
    }

    pub fn vpip(&self) -> Probability {
        self.vpip
    }
    pub fn pfr(&self) -> Probability {
        self.pfr
    }
    pub fn af(&self) -> f64 {
        self.af
    }
    pub fn three_bet(&self) -> Probability {
        self.three_bet
    }
    pub fn fold_to_3bet(&self) -> Probability {
        self.fold_to_3bet
    }

    pub fn vpip_pfr_gap(&self) -> f64 {
        (self.vpip - self.pfr).max(0.0)
    }

    pub fn preflop_aggression_ratio(&self) -> f64 {
        if self.vpip <= 0.0 {
            0.0
        } else {
            self.pfr / self.vpip
        }
    }

    /// how bluffy villains perceive hero to be, in [0, 1]
    pub fn image_bluffiness(&self) -> Probability {
        let af_norm = (self.af / 5.0).clamp(0.0, 1.0);
        let ratio_norm = self.preflop_aggression_ratio().clamp(0.0, 1.0);
        (0.42 * self.vpip + 0.34 * self.pfr + 0.14 * af_norm + 0.10 * ratio_norm).clamp(0.0, 1.0)
    }

    pub fn style_label(&self) -> &'static str {
        if self.vpip < 0.17 && self.pfr < 0.13 {
            "Nit / Tight-Passive"
        } else if self.vpip < 0.24 && self.pfr >= 0.16 && self.af >= 2.0 {
            "TAG"
        } else if self.vpip >= 0.28 && self.pfr >= 0.20 && self.af >= 2.2 {
            "LAG"
        } else if self.vpip >= 0.30 && self.pfr < 0.17 {
            "Loose-Passive"
        } else if self.af >= 4.0 && self.vpip >= 0.35 {
            "Maniac / Over-aggressive"
        } else {
            "Hybrid / Transitional"
        }
    }

    pub fn leak_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.vpip_pfr_gap() > 0.10 {
            flags.push("Large VPIP-PFR gap: likely overcalling preflop.".to_string());
        }
        if self.preflop_aggression_ratio() < 0.62 && self.vpip > 0.25 {
            flags.push(
                "Low raise-to-play ratio: not converting enough opens to raises.".to_string(),
            );
        }
        if self.af > 4.0 {
            flags.push("Very high AF: likely over-bluffing late streets.".to_string());
        }
        if self.fold_to_3bet > 0.65 {
            flags.push("High fold to 3-bet: opponents can re-raise light.".to_string());
        }
        if self.three_bet < 0.05 {
            flags.push("Low 3-bet rate: value-heavy and potentially face-up.".to_string());
        }
        flags
    }

    pub fn position_guidance(&self, position: Position, street: Street) -> Guidance {
        let (low, high) = position.open_target();
        let mut notes = Vec::new();
        if position == Position::BTN {
            notes.push("Apply widest pressure here; isolate stations with larger sizings.".to_string());
        }
        if position.is_blind() {
            notes.push(
                "OOP penalty is real: reduce low-equity bluffs and avoid bloating marginal pots."
                    .to_string(),
            );
        }
        if position.is_early() {
            notes.push(
                "Use tighter value-heavy opens; preserve EV by avoiding dominated offsuit broadways."
                    .to_string(),
            );
        }
        if matches!(street, Street::Turn | Street::Rive) && self.af > 3.6 {
            notes.push(
                "Your AF is high: tighten river bluffs and keep value density high.".to_string(),
            );
        }
        if self.vpip_pfr_gap() > 0.10 {
            notes.push(
                "You call too much versus your opens: convert best call candidates into raises."
                    .to_string(),
            );
        }
        Guidance {
            position,
            street,
            target_open_vpip_range: (crate::round(low, 3), crate::round(high, 3)),
            style_label: self.style_label(),
            notes,
        }
    }

    /// serialization view including the derived quantities
    pub fn summary(&self) -> HeroSummary {
        HeroSummary {
            vpip: crate::round(self.vpip, 4),
            pfr: crate::round(self.pfr, 4),
            af: crate::round(self.af, 3),
            three_bet: crate::round(self.three_bet, 4),
            fold_to_3bet: crate::round(self.fold_to_3bet, 4),
            vpip_pfr_gap: crate::round(self.vpip_pfr_gap(), 4),
            preflop_aggression_ratio: crate::round(self.preflop_aggression_ratio(), 4),
            image_bluffiness: crate::round(self.image_bluffiness(), 4),
            style_label: self.style_label(),
            leak_flags: self.leak_flags(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guidance {
    pub position: Position,
    pub street: Street,
    pub target_open_vpip_range: (f64, f64),
    pub style_label: &'static str,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSummary {
    pub vpip: f64,
    pub pfr: f64,
    pub af: f64,
    pub three_bet: f64,
    pub fold_to_3bet: f64,
    pub vpip_pfr_gap: f64,
    pub preflop_aggression_ratio: f64,
    pub image_bluffiness: f64,
    pub style_label: &'static str,
    pub leak_flags: Vec<String>,
}
