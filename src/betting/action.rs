use serde::Deserialize;
use serde::Serialize;

/// A limit betting decision. Amounts are fixed by the table, so the
/// action alone determines the next betting state.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Call,
    Bet,
}

impl Action {
    pub const fn all() -> [Self; 3] {
        [Self::Fold, Self::Call, Self::Bet]
    }
    /// tie-break order among equally scored actions: call, then bet, then fold
    pub const fn preference(&self) -> u8 {
        match self {
            Self::Call => 2,
            Self::Bet => 1,
            Self::Fold => 0,
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "fold" | "f" => Ok(Self::Fold),
            "call" | "c" | "check" => Ok(Self::Call),
            "bet" | "b" | "raise" | "r" => Ok(Self::Bet),
            _ => Err(anyhow::anyhow!("invalid action: {}", s)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_order() {
        let mut actions = Action::all().to_vec();
        actions.sort_by_key(|a| std::cmp::Reverse(a.preference()));
        assert_eq!(actions, vec![Action::Call, Action::Bet, Action::Fold]);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(Action::try_from("Raise").unwrap(), Action::Bet);
        assert_eq!(Action::try_from("check").unwrap(), Action::Call);
        assert_eq!(Action::try_from("f").unwrap(), Action::Fold);
        assert!(Action::try_from("shove").is_err());
    }
}
