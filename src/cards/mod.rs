pub mod card;
pub use card::*;

pub mod context;
pub use context::*;

pub mod hand;
pub use hand::*;

pub mod phase;
pub use phase::*;

pub mod rank;
pub use rank::*;

pub mod shoe;
pub use shoe::*;

pub mod suit;
pub use suit::*;
