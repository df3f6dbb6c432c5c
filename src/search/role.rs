use crate::betting::seat::Seat;
use serde::Deserialize;
use serde::Serialize;

/// Who produced a node: nobody at the root, otherwise the seat that acted.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Start,
    Seat(Seat),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Seat(seat) => write!(f, "{}", seat),
        }
    }
}
