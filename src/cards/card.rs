use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};

/// One of the 52 cards. Orders by rank, then suit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// all 52 cards in ascending order
    pub fn all() -> impl Iterator<Item = Card> {
        (0..52u8).map(Card::from)
    }
    /// parse a sequence of cards, preserving order.
    /// accepts whitespace/comma separated or concatenated text: "As Kd", "AsKd", "10hJc"
    pub fn parse(s: &str) -> anyhow::Result<Vec<Card>> {
        let text = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect::<String>();
        anyhow::ensure!(text.is_ascii(), "invalid card text: {:?}", s);
        let mut cards = Vec::new();
        let mut rest = text.as_str();
        while !rest.is_empty() {
            let n = if rest.starts_with("10") { 3 } else { 2 };
            anyhow::ensure!(rest.len() >= n, "truncated card text: {:?}", s);
            let (head, tail) = rest.split_at(n);
            cards.push(Card::try_from(head)?);
            rest = tail;
        }
        Ok(cards)
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
/// Ts
/// 35
/// 0b00100011
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism
/// each card is just one bit turned on
/// Ts
/// xxxxxxxxxxxx 0000000000000000100000000000000000000000000000000000
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self::from(n.trailing_zeros() as u8)
    }
}

/// str isomorphism
/// rank then suit, "As", "Td", "10h"
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        anyhow::ensure!(s.len() >= 2 && s.is_ascii(), "invalid card: {:?}", s);
        let (rank, suit) = s.split_at(s.len() - 1);
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
