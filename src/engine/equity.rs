use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// Monte Carlo showdown equity with its sampling error.
/// `stderr` is the standard error of the mean share, used to widen
/// EV point estimates into confidence intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityEstimate {
    pub equity: Probability,
    pub stderr: f64,
}

impl EquityEstimate {
    /// equity against nobody: the pot is already hero's
    pub const fn certain() -> Self {
        Self {
            equity: 1.0,
            stderr: 0.0,
        }
    }
}
