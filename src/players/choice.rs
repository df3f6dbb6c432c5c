use crate::Chips;
use crate::Probability;
use crate::Utility;
use crate::betting::action::Action;

/// An action and how well it has done for the current hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub action: Action,
    pub grade: Option<Probability>,
}

impl Choice {
    /// unexplored actions count as losing
    pub fn score(&self) -> Probability {
        self.grade.unwrap_or(0.)
    }

    /// the best graded action, ties going to call, then bet, then fold
    pub fn decide(grades: &[(Action, Option<Probability>)]) -> Option<Action> {
        grades
            .iter()
            .map(|(action, grade)| Self {
                action: *action,
                grade: *grade,
            })
            .max_by(|a, b| {
                a.score()
                    .partial_cmp(&b.score())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.action.preference().cmp(&b.action.preference()))
            })
            .map(|choice| choice.action)
    }

    /// chips expected from staying in: the pot when winning,
    /// the bid already committed when losing
    pub fn expectation(equity: Probability, pot: Chips, bid: Chips) -> Utility {
        equity * pot as Utility - (1. - equity) * bid as Utility
    }

    /// fold when staying in loses on average, otherwise the best of
    /// the remaining actions. without an equity estimate the hand stays in.
    pub fn settle(
        grades: &[(Action, Option<Probability>)],
        equity: Option<Probability>,
        pot: Chips,
        bid: Chips,
    ) -> Option<Action> {
        let foldable = grades.iter().any(|(a, _)| *a == Action::Fold);
        match equity {
            Some(p) if foldable && Self::expectation(p, pot, bid) <= 0. => Some(Action::Fold),
            _ => Self::decide(
                &grades
                    .iter()
                    .filter(|(a, _)| *a != Action::Fold)
                    .copied()
                    .collect::<Vec<_>>(),
            ),
        }
    }
}
