use crate::cards::context::CardContext;
use crate::simulation::odds::Odds;
use petgraph::graph::NodeIndex;

/// A statistics update waiting to be propagated up the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub key: CardContext,
    pub wins: u32,
    pub totals: u32,
}

impl Stage {
    /// marks a hand as seen without crediting anything
    pub fn empty(key: CardContext) -> Self {
        Self {
            key,
            wins: 0,
            totals: 0,
        }
    }
}

impl From<(CardContext, Odds)> for Stage {
    fn from((key, odds): (CardContext, Odds)) -> Self {
        Self {
            key,
            wins: odds.wins as u32,
            totals: odds.trials as u32,
        }
    }
}

/// Outcome of one descent through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// the node to simulate next
    Expand(NodeIndex),
    /// nothing left to learn for this hand below the start node
    Done,
}
