use crate::CARD_BRANCHING;
use crate::COMPUTE_TIME;
use crate::EXPLORATION;
use crate::MAX_NODES;
use crate::MIN_COMPUTE_TIME;
use crate::Probability;
use crate::ROLLOUT_TRIALS;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Tuning shared by every tree in a set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// rollouts per win-odds estimate
    pub trials: usize,
    /// board completions per post-flop simulation
    pub branching: usize,
    /// UCB1 exploration constant
    pub exploration: Probability,
    /// smallest build budget accepted
    pub floor: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trials: ROLLOUT_TRIALS,
            branching: CARD_BRANCHING,
            exploration: EXPLORATION,
            floor: MIN_COMPUTE_TIME,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.trials > 0, "trials must be positive");
        anyhow::ensure!(self.branching > 0, "card branching must be positive");
        anyhow::ensure!(
            self.exploration.is_finite() && self.exploration >= 0.,
            "exploration constant must be finite and non-negative, got {}",
            self.exploration
        );
        Ok(())
    }
}

/// Bound on one build: whichever of wall time or iterations runs out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub time: Duration,
    pub nodes: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            time: COMPUTE_TIME,
            nodes: MAX_NODES,
        }
    }
}

/// What a build accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub iterations: usize,
    pub exhausted: bool,
    pub elapsed: Duration,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} iterations in {:?}{}",
            self.iterations,
            self.elapsed,
            if self.exhausted { " (exhausted)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert!(Budget::default().time >= Settings::default().floor);
    }

    #[test]
    fn rejects_degenerate_settings() {
        let zero = Settings {
            trials: 0,
            ..Settings::default()
        };
        let nan = Settings {
            exploration: Probability::NAN,
            ..Settings::default()
        };
        assert!(zero.validate().is_err());
        assert!(nan.validate().is_err());
    }
}
