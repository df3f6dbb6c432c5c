pub mod census;
pub use census::*;

pub mod evaluator;
pub use evaluator::*;

pub mod kickers;
pub use kickers::*;

pub mod ranking;
pub use ranking::*;

pub mod score;
pub use score::*;
