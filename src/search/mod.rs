pub mod node;
pub use node::*;

pub mod role;
pub use role::*;

pub mod set;
pub use set::*;

pub mod settings;
pub use settings::*;

pub mod stage;
pub use stage::*;

pub mod tree;
pub use tree::*;
