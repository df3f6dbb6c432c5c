use super::seat::Seat;
use crate::B_BLIND;
use crate::Chips;
use crate::MAX_SEATS;
use crate::S_BLIND;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

/// The preflop turn order of one table. The last two seats post the
/// small and big blind; after the flop they act first.
///
/// One search tree exists per distinct seating.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Seating(Vec<Seat>);

impl Seating {
    pub fn new(seats: Vec<Seat>) -> anyhow::Result<Self> {
        anyhow::ensure!(seats.len() >= 2, "a table needs at least 2 seats");
        anyhow::ensure!(
            seats.len() <= MAX_SEATS,
            "a single shoe cannot deal {} seats",
            seats.len()
        );
        anyhow::ensure!(
            seats.iter().collect::<BTreeSet<_>>().len() == seats.len(),
            "duplicate seat in {:?}",
            seats
        );
        Ok(Self(seats))
    }
    /// heads up, hero in the big blind
    pub fn heads_up() -> Self {
        Self(vec![Seat::Villain(0), Seat::Hero])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn seats(&self) -> &[Seat] {
        &self.0
    }
    pub fn preflop(&self) -> Vec<Seat> {
        self.0.clone()
    }
    /// blinds first, then everyone else in preflop order
    pub fn postflop(&self) -> Vec<Seat> {
        let n = self.0.len();
        self.0[n - 2..]
            .iter()
            .chain(self.0[..n - 2].iter())
            .copied()
            .collect()
    }
    pub fn small_blind(&self) -> Seat {
        self.0[self.0.len() - 2]
    }
    pub fn big_blind(&self) -> Seat {
        self.0[self.0.len() - 1]
    }
    pub fn contains(&self, seat: &Seat) -> bool {
        self.0.contains(seat)
    }
    /// forced bet a seat posts before the cards are dealt
    pub fn blind(&self, seat: &Seat) -> Chips {
        match seat {
            s if *s == self.small_blind() => S_BLIND,
            s if *s == self.big_blind() => B_BLIND,
            _ => 0,
        }
    }
}

impl TryFrom<&str> for Seating {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(
            s.split(',')
                .filter(|s| !s.trim().is_empty())
                .map(Seat::try_from)
                .collect::<anyhow::Result<Vec<_>>>()?,
        )
    }
}
impl TryFrom<String> for Seating {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Seating> for String {
    fn from(seating: Seating) -> Self {
        seating.to_string()
    }
}

impl std::fmt::Display for Seating {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let seats = self.0.iter().map(Seat::to_string).collect::<Vec<_>>();
        write!(f, "{}", seats.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinds_lead_postflop() {
        let seating = Seating::try_from("V0,V1,H,V2").unwrap();
        assert_eq!(seating.small_blind(), Seat::Hero);
        assert_eq!(seating.big_blind(), Seat::Villain(2));
        assert_eq!(seating.blind(&Seat::Hero), S_BLIND);
        assert_eq!(seating.blind(&Seat::Villain(2)), B_BLIND);
        assert_eq!(seating.blind(&Seat::Villain(0)), 0);
        assert_eq!(
            seating.postflop(),
            vec![Seat::Hero, Seat::Villain(2), Seat::Villain(0), Seat::Villain(1)]
        );
    }

    #[test]
    fn heads_up_order_is_unchanged() {
        let seating = Seating::heads_up();
        assert_eq!(seating.postflop(), seating.preflop());
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Seating::try_from("H").is_err());
        assert!(Seating::try_from("H,V0,H").is_err());
        assert!(Seating::try_from("H,Q").is_err());
    }
}
