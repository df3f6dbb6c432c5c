use super::evaluator::Evaluator;
use super::kickers::Kickers;
use super::ranking::Ranking;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::rank::Rank;

/// A hand's strength: category plus tie-breaking ranks.
///
/// Comparison is lexicographic over [category, defining ranks, kickers].
/// Two hands may score exactly equal; that tie is preserved.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Score {
    ranking: Ranking,
    kickers: Kickers,
}

impl Score {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }
    pub fn category(&self) -> u8 {
        self.ranking.category()
    }
    /// the score as an ordered vector `[category, tiebreak..]`
    /// with ranks as face values 2..=14
    pub fn vector(&self) -> Vec<u8> {
        std::iter::once(self.category())
            .chain(self.ranking.ranks().iter().map(Rank::value))
            .chain(Vec::<Rank>::from(self.kickers).iter().map(Rank::value))
            .collect()
    }
}

/// Score exactly seven distinct cards.
pub fn score(cards: &[Card]) -> anyhow::Result<Score> {
    anyhow::ensure!(cards.len() == 7, "can only score 7 cards, got {}", cards.len());
    let hand = Hand::from(cards);
    anyhow::ensure!(hand.size() == 7, "duplicate card in scored hand");
    Ok(Score::from(hand))
}

impl From<Hand> for Score {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Score {
    fn from(evaluator: Evaluator) -> Self {
        let ranking = evaluator.find_ranking();
        let kickers = evaluator.find_kickers(ranking);
        Self { ranking, kickers }
    }
}

impl From<(Ranking, Kickers)> for Score {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.ranking, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn of(s: &str) -> Score {
        score(&Card::parse(s).unwrap()).unwrap()
    }

    #[test]
    fn straight_flush_beats_four_aces() {
        assert!(of("2s3s4s5s6s7d8d") > of("AhAcAdAs2c3c4c"));
    }

    #[test]
    fn wheel_tops_at_five() {
        assert_eq!(of("As2d3c4h5s9dKc").vector(), vec![5, 5]);
    }

    #[test]
    fn category_ladder() {
        let ladder = [
            "2c4d6h8sTcQdAh", // high card
            "2c2d6h8sTcQdAh", // pair
            "2c2d6h6sTcQdAh", // two pair
            "2c2d2h8sTcQdAh", // trips
            "2c3d4h5s6cQdAh", // straight
            "2c4c6c8cTcQdAh", // flush
            "2c2d2h8s8cQdAh", // full house
            "2c2d2h2sTcQdAh", // quads
            "2c3c4c5c6cQdAh", // straight flush
        ];
        let scores = ladder.iter().map(|s| of(s)).collect::<Vec<_>>();
        for (i, pair) in scores.windows(2).enumerate() {
            assert!(pair[0] < pair[1], "{} should lose to {}", ladder[i], ladder[i + 1]);
        }
        for (i, score) in scores.iter().enumerate() {
            assert_eq!(score.category() as usize, i + 1);
        }
    }

    #[test]
    fn kickers_break_ties() {
        assert!(of("AsAd9c7h5d3c2s") > of("AhAc8c7s5h3d2h"));
        assert_eq!(of("AsAdKcQh9d3c2s").vector(), vec![2, 14, 13, 12, 9]);
        assert_eq!(of("AsAdAcAhKd3c2s").vector(), vec![8, 14, 13]);
        assert_eq!(of("AsAdKcKh9d3c2s").vector(), vec![3, 14, 13, 9]);
    }

    #[test]
    fn exact_ties_are_preserved() {
        // both play the board
        let a = of("2c3dTsJsQsKsAd");
        let b = of("2h3hTsJsQsKsAd");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_wrong_sizes() {
        assert!(score(&Card::parse("AsKsQsJsTs").unwrap()).is_err());
        assert!(score(&Card::parse("AsAsQsJsTs9s8s").unwrap()).is_err());
    }
}
