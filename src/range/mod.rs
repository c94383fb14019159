pub mod continuation;
pub use continuation::*;

pub mod preflop;
pub use preflop::*;

pub mod sampler;
pub use sampler::*;
