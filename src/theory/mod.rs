pub mod math;
pub use math::*;

pub mod spr;
pub use spr::*;
