use super::ranking::Ranking;
use super::score::Score;
use crate::cards::hand::Hand;
use crate::cards::shoe::Shoe;
use rand::Rng;

/// Category frequencies over random 7-card hands.
#[derive(Debug, Clone, Default)]
pub struct Census {
    counts: [usize; 9],
    total: usize,
}

impl Census {
    pub fn sample<R: Rng>(n: usize, rng: &mut R) -> Self {
        let shoe = Shoe::new();
        let mut census = Self::default();
        for _ in 0..n {
            let cards = shoe.permute(7, rng).expect("full shoe holds 7 cards");
            census.witness(Score::from(Hand::from(cards.as_slice())));
        }
        census
    }
    pub fn witness(&mut self, score: Score) {
        self.counts[score.category() as usize - 1] += 1;
        self.total += 1;
    }
    pub fn total(&self) -> usize {
        self.total
    }
    /// (name, count, percent) per category, high card first
    pub fn rows(&self) -> Vec<(&'static str, usize, f32)> {
        Ranking::names()
            .into_iter()
            .zip(self.counts)
            .map(|(name, count)| (name, count, 100. * count as f32 / self.total.max(1) as f32))
            .collect()
    }
}

impl std::fmt::Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (name, count, percent) in self.rows() {
            writeln!(f, "{:<16}{:>10}{:>9.3}%", name, count, percent)?;
        }
        write!(f, "{:<16}{:>10}", "all_hands", self.total)
    }
}
