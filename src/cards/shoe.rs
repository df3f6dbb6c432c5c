use super::card::Card;
use super::hand::Hand;
use rand::Rng;

/// The 52-card shoe used to deal hypothetical boards and opponent holes.
///
/// The removed partition is always the complement of the available one,
/// so `available ∪ removed` is the full deck with no duplicates by
/// construction. A checkpoint remembers the available set so that repeated
/// rollouts can start from the same reduced shoe.
#[derive(Debug, Clone, Copy)]
pub struct Shoe {
    available: Hand,
    saved: Option<Hand>,
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new()
    }
}

impl Shoe {
    pub fn new() -> Self {
        Self {
            available: Hand::full(),
            saved: None,
        }
    }
    pub fn available(&self) -> Hand {
        self.available
    }
    pub fn removed(&self) -> Hand {
        self.available.complement()
    }

    /// move a known card to the removed partition.
    /// a card that was already removed stays removed.
    pub fn remove(&mut self, card: Card) {
        if self.available.contains(&card) {
            self.available.remove(card);
        } else {
            debug_assert!(self.removed().contains(&card));
        }
    }

    /// remove n random cards. if fewer than n remain,
    /// the removed cards are shuffled back in first.
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<Card> {
        assert!(n <= 52, "cannot draw {} cards from one deck", n);
        if n > self.available.size() {
            log::trace!("reshuffling shoe with {} cards left", self.available.size());
            self.reshuffle();
        }
        (0..n)
            .map(|_| {
                let i = rng.random_range(0..self.available.size());
                let card = self.available.nth(i);
                self.available.remove(card);
                card
            })
            .collect()
    }

    /// a random sample of n available cards. the shoe is left untouched.
    pub fn permute<R: Rng>(&self, n: usize, rng: &mut R) -> anyhow::Result<Vec<Card>> {
        anyhow::ensure!(
            n <= self.available.size(),
            "cannot permute {} of {} available cards",
            n,
            self.available.size()
        );
        let mut copy = *self;
        Ok(copy.draw(n, rng))
    }

    /// return every removed card to the shoe
    pub fn reshuffle(&mut self) {
        self.available = Hand::full();
    }

    pub fn save(&mut self) {
        self.saved = Some(self.available);
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        self.available = self
            .saved
            .ok_or_else(|| anyhow::anyhow!("restore without a saved checkpoint"))?;
        Ok(())
    }
}

impl std::fmt::Display for Shoe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Shoe ({} of 52 cards remaining)", self.available.size())
    }
}
