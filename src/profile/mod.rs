pub mod archetype;
pub use archetype::*;

pub mod hero;
pub use hero::*;

pub mod position;
pub use position::*;

pub mod role;
pub use role::*;
