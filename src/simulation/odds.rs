use crate::Probability;

/// Rollout outcome: how many of the trials the acting player won.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Odds {
    pub wins: usize,
    pub trials: usize,
}

impl Odds {
    pub fn rate(&self) -> Probability {
        match self.trials {
            0 => 0.,
            n => self.wins as Probability / n as Probability,
        }
    }
}

impl From<(usize, usize)> for Odds {
    fn from((wins, trials): (usize, usize)) -> Self {
        debug_assert!(wins <= trials);
        Self { wins, trials }
    }
}

impl std::ops::Add for Odds {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            wins: self.wins + rhs.wins,
            trials: self.trials + rhs.trials,
        }
    }
}

impl std::iter::Sum for Odds {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.wins, self.trials, 100. * self.rate())
    }
}
