use serde::Deserialize;
use serde::Serialize;

/// A seat relative to the agent doing the searching.
///
/// Seats serialize through their text form (`H`, `V0`, `V1`, ...)
/// because they key maps in persisted trees.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Seat {
    Hero,
    Villain(u8),
}

impl TryFrom<&str> for Seat {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        match s.chars().next() {
            Some('H') | Some('h') if s.len() == 1 => Ok(Self::Hero),
            Some('V') | Some('v') => Ok(Self::Villain(s[1..].parse()?)),
            _ => Err(anyhow::anyhow!("invalid seat: {}", s)),
        }
    }
}
impl TryFrom<String> for Seat {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Seat> for String {
    fn from(seat: Seat) -> Self {
        seat.to_string()
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Hero => write!(f, "H"),
            Self::Villain(i) => write!(f, "V{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_forms() {
        assert_eq!(Seat::try_from("H").unwrap(), Seat::Hero);
        assert_eq!(Seat::try_from("v12").unwrap(), Seat::Villain(12));
        assert_eq!(Seat::Villain(3).to_string(), "V3");
        assert!(Seat::try_from("X1").is_err());
        assert!(Seat::try_from("Vx").is_err());
        assert!(Seat::try_from("").is_err());
    }

    #[test]
    fn json_is_text() {
        let json = serde_json::to_string(&Seat::Villain(2)).unwrap();
        assert_eq!(json, "\"V2\"");
        assert_eq!(serde_json::from_str::<Seat>(&json).unwrap(), Seat::Villain(2));
    }
}
