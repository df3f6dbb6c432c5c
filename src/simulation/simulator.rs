use super::odds::Odds;
use crate::MAX_SEATS;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::shoe::Shoe;
use crate::evaluation::score::Score;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Monte Carlo win-odds estimator for one player's known cards.
///
/// Each trial completes the board and deals every opponent a fresh hole
/// from a shoe with the known cards removed, then scores all 7-card hands.
/// The shoe is rewound to its checkpoint between trials, so trials are
/// independent of one another and of their order.
///
/// An exact tie for the best score counts as a win for the acting player.
#[derive(Debug, Clone)]
pub struct Simulator {
    hole: Vec<Card>,
    board: Vec<Card>,
    opponents: usize,
}

impl Simulator {
    pub fn new(hole: &[Card], board: &[Card], opponents: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(hole.len() == 2, "expected 2 hole cards, got {}", hole.len());
        anyhow::ensure!(
            matches!(board.len(), 0 | 3 | 4 | 5),
            "board must have 0, 3, 4 or 5 cards, got {}",
            board.len()
        );
        anyhow::ensure!(
            opponents < MAX_SEATS,
            "a single shoe cannot deal {} opponents",
            opponents
        );
        let known = hole.iter().chain(board).copied().collect::<Vec<_>>();
        anyhow::ensure!(
            Hand::from(known.as_slice()).size() == known.len(),
            "duplicate card among known cards"
        );
        Ok(Self {
            hole: hole.to_vec(),
            board: board.to_vec(),
            opponents,
        })
    }

    pub fn simulate<R: Rng>(&self, trials: usize, rng: &mut R) -> anyhow::Result<Odds> {
        anyhow::ensure!(trials > 0, "at least one trial is required");
        let mut shoe = Shoe::new();
        for card in self.hole.iter().chain(self.board.iter()) {
            shoe.remove(*card);
        }
        shoe.save();
        let mut wins = 0;
        for _ in 0..trials {
            if self.trial(&mut shoe, rng) {
                wins += 1;
            }
            shoe.restore()?;
        }
        log::trace!("simulated {} vs {} opponents: {}/{}", Hand::from(self.hole.as_slice()), self.opponents, wins, trials);
        Ok(Odds::from((wins, trials)))
    }

    /// split the trials across rayon workers, each with its own shoe
    /// and its own rng seeded from the caller's.
    pub fn simulate_parallel<R: Rng>(
        &self,
        trials: usize,
        workers: usize,
        rng: &mut R,
    ) -> anyhow::Result<Odds> {
        anyhow::ensure!(trials > 0, "at least one trial is required");
        anyhow::ensure!(workers > 0, "at least one worker is required");
        let workers = workers.min(trials);
        (0..workers)
            .map(|i| (trials / workers + usize::from(i < trials % workers), rng.random::<u64>()))
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(n, seed)| self.simulate(n, &mut SmallRng::seed_from_u64(seed)))
            .collect::<anyhow::Result<Vec<Odds>>>()
            .map(|odds| odds.into_iter().sum())
    }

    fn trial<R: Rng>(&self, shoe: &mut Shoe, rng: &mut R) -> bool {
        let mut board = Hand::from(self.board.as_slice());
        for card in shoe.draw(5 - self.board.len(), rng) {
            board.insert(card);
        }
        let hero = Score::from(Hand::add(Hand::from(self.hole.as_slice()), board));
        (0..self.opponents)
            .map(|_| Hand::from(shoe.draw(self.hole.len(), rng).as_slice()))
            .map(|hole| Score::from(Hand::add(hole, board)))
            .all(|villain| hero >= villain)
    }
}
