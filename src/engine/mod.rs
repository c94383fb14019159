pub mod action;
pub use action::*;

pub mod calculator;
pub use calculator::*;

pub mod equity;
pub use equity::*;

pub mod leaks;
pub use leaks::*;

pub mod report;
pub use report::*;

pub mod scenario;
pub use scenario::*;

pub mod verdict;
pub use verdict::*;
