use super::card::Card;
use super::hand::Hand;
use super::phase::Phase;
use super::shoe::Shoe;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// The cards one player knows: hole cards plus the visible board.
///
/// The length encodes the phase (2, 5, 6 or 7 cards). The hole pair and the
/// flop triple are each sorted, so the same cards observed in a different
/// order produce the same key. Turn and river cards keep their deal order.
///
/// Truncating a context to a shorter phase yields the context that phase
/// would have seen, which is how statistics gathered deep in a hand are
/// pooled at the betting nodes above it.
///
/// # Serialization
///
/// Contexts are used as map keys in persisted trees, so they serialize to
/// their text form, hole and board separated by `~`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CardContext(Vec<Card>);

impl CardContext {
    pub const SEPARATOR: &'static str = "~";

    pub fn new(hole: &[Card], board: &[Card]) -> anyhow::Result<Self> {
        anyhow::ensure!(hole.len() == 2, "expected 2 hole cards, got {}", hole.len());
        anyhow::ensure!(
            matches!(board.len(), 0 | 3 | 4 | 5),
            "expected 0, 3, 4 or 5 board cards, got {}",
            board.len()
        );
        let known = hole.iter().chain(board.iter()).copied().collect::<Vec<_>>();
        anyhow::ensure!(
            Hand::from(known.as_slice()).size() == known.len(),
            "duplicate card among {:?}",
            known.iter().map(Card::to_string).collect::<Vec<_>>()
        );
        let mut cards = known;
        cards[..2].sort();
        if cards.len() >= 5 {
            cards[2..5].sort();
        }
        Ok(Self(cards))
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn hole(&self) -> &[Card] {
        &self.0[..2]
    }
    pub fn board(&self) -> &[Card] {
        &self.0[2..]
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn phase(&self) -> Phase {
        Phase::try_from(self.len()).expect("contexts are constructed with valid lengths")
    }

    /// the context as it was when only n cards were known.
    /// asking for at least as many cards as are known returns the whole context.
    pub fn truncate(&self, n: usize) -> Self {
        if n >= self.len() {
            self.clone()
        } else {
            assert!(matches!(n, 2 | 5 | 6), "no phase has {} known cards", n);
            Self(self.0[..n].to_vec())
        }
    }

    /// whether this context extends (or equals) a shorter one
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// fill in the board up to the given phase with random cards
    /// from a shoe that has every known card removed.
    /// cards beyond the phase are dropped.
    pub fn complete<R: Rng>(&self, phase: Phase, rng: &mut R) -> Self {
        let known = self.truncate(phase.slots());
        let missing = phase.slots() - known.len();
        if missing == 0 {
            return known;
        }
        let mut shoe = Shoe::new();
        for card in known.cards() {
            shoe.remove(*card);
        }
        let mut board = known.board().to_vec();
        board.extend(shoe.draw(missing, rng));
        Self::new(known.hole(), &board).expect("drawn cards are distinct from known cards")
    }
}

impl From<&CardContext> for Hand {
    fn from(context: &CardContext) -> Self {
        Hand::from(context.cards())
    }
}

impl TryFrom<&str> for CardContext {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (hole, board) = s.split_once(Self::SEPARATOR).unwrap_or((s, ""));
        Self::new(&Card::parse(hole)?, &Card::parse(board)?)
    }
}
impl TryFrom<String> for CardContext {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<CardContext> for String {
    fn from(context: CardContext) -> Self {
        context.to_string()
    }
}

impl crate::Arbitrary for CardContext {
    fn random() -> Self {
        let ref mut rng = rand::rng();
        let board = [0, 3, 4, 5][rng.random_range(0..4)];
        let cards = Shoe::new().draw(2 + board, rng);
        Self::new(&cards[..2], &cards[2..]).expect("drawn cards are distinct")
    }
}

/// display CardContext as hole ~ board
impl std::fmt::Display for CardContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in self.hole() {
            write!(f, "{}", card)?;
        }
        write!(f, "{}", Self::SEPARATOR)?;
        for card in self.board() {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn canonical_hole_and_flop() {
        let a = CardContext::try_from("AsKd~2c9h5d").unwrap();
        let b = CardContext::try_from("KdAs~5d2c9h").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn turn_order_is_kept() {
        let a = CardContext::try_from("AsKd~2c9h5dJc").unwrap();
        let b = CardContext::try_from("AsKd~2c9h5dJcQh").unwrap();
        let c = CardContext::try_from("AsKd~2c9h5dQhJc").unwrap();
        assert!(b.starts_with(&a));
        assert!(!c.starts_with(&a));
    }

    #[test]
    fn truncation_per_phase() {
        let full = CardContext::try_from("AsKd~2c9h5dJcQh").unwrap();
        assert_eq!(full.truncate(2).to_string(), "KdAs~");
        assert_eq!(full.truncate(5).phase(), Phase::Flop);
        assert_eq!(full.truncate(6).phase(), Phase::Turn);
        assert_eq!(full.truncate(7), full);
        assert_eq!(full.truncate(2).truncate(7).len(), 2);
    }

    #[test]
    fn rejects_malformed() {
        assert!(CardContext::try_from("As~2c3c4c").is_err());
        assert!(CardContext::try_from("AsKd~2c3c").is_err());
        assert!(CardContext::try_from("AsAs~").is_err());
        assert!(CardContext::try_from("AsKd~Kd2c3c").is_err());
        assert!(CardContext::try_from("AsKd~Ks2c3c").is_ok());
    }

    #[test]
    fn completion_extends_prefix() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let hole = CardContext::try_from("AsKd").unwrap();
        let river = hole.complete(Phase::Rive, rng);
        assert_eq!(river.len(), 7);
        assert!(river.starts_with(&hole));
        assert_eq!(Hand::from(&river).size(), 7);
        assert_eq!(river.complete(Phase::Flop, rng), river.truncate(5));
    }

    #[test]
    fn text_roundtrip() {
        let context = CardContext::random();
        assert_eq!(context, CardContext::try_from(context.to_string()).unwrap());
    }
}
