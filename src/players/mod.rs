pub mod choice;
pub use choice::*;

pub mod player;
pub use player::*;

pub mod purse;
pub use purse::*;

pub mod search;
pub use search::*;

pub mod spot;
pub use spot::*;
