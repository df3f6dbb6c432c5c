pub mod odds;
pub use odds::*;

pub mod simulator;
pub use simulator::*;
