use serde::Deserialize;
use serde::Serialize;

/// Card phase of a hand: preflop, flop, turn, river, showdown.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Pref = 0isize,
    Flop = 1isize,
    Turn = 2isize,
    Rive = 3isize,
    Show = 4isize,
}

impl Phase {
    pub const fn all() -> &'static [Self] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive, Self::Show]
    }
    pub const fn next(&self) -> Self {
        match self {
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => Self::Show,
            Self::Show => panic!("terminal"),
        }
    }
    /// board cards visible in this phase
    pub const fn n_board(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive | Self::Show => 5,
        }
    }
    /// length of a card context in this phase
    pub const fn slots(&self) -> usize {
        2 + self.n_board()
    }
    /// phases in which a betting round is played
    pub const fn is_betting(&self) -> bool {
        !matches!(self, Self::Show)
    }
}

/// the phase a card context of this length belongs to.
/// a full 7-card context maps to the river.
impl TryFrom<usize> for Phase {
    type Error = anyhow::Error;
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(Self::Pref),
            5 => Ok(Self::Flop),
            6 => Ok(Self::Turn),
            7 => Ok(Self::Rive),
            _ => Err(anyhow::anyhow!("no phase has {} known cards", n)),
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase as u8
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "Preflop"),
            Self::Flop => write!(f, "Flop"),
            Self::Turn => write!(f, "Turn"),
            Self::Rive => write!(f, "River"),
            Self::Show => write!(f, "Showdown"),
        }
    }
}
