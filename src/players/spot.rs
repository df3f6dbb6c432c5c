use crate::Chips;
use crate::cards::card::Card;
use crate::cards::context::CardContext;

/// Everything a player is told when asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    pub hand: Vec<Card>,
    pub board: Vec<Card>,
    /// seats still in the hand besides this one
    pub opponents: usize,
    /// chips needed to match the current bid
    pub call: Chips,
    /// chips this player has already put in this phase
    pub bid: Chips,
    pub pot: Chips,
    pub raise_allowed: bool,
}

impl Spot {
    pub fn context(&self) -> anyhow::Result<CardContext> {
        CardContext::new(&self.hand, &self.board)
    }
}
