pub mod cards;
pub mod engine;
pub mod error;
pub mod profile;
pub mod range;
pub mod theory;

pub use error::Error;

/// amounts are denominated in big blinds
pub type Chips = f64;
pub type Probability = f64;
pub type Utility = f64;

/// round half away from zero to a fixed number of decimal places,
/// mirroring how reported quantities are truncated for stable output
pub(crate) fn round(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
