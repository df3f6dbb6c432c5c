pub mod action;
pub use action::*;

pub mod context;
pub use context::*;

pub mod seat;
pub use seat::*;

pub mod seating;
pub use seating::*;
