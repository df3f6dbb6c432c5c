use crate::cards::rank::Rank;

/// A hand's kicker cards, as a 13-bit rank mask.
///
/// Two masks with the same number of kickers compare like the
/// descending rank lists they encode, so the derived ordering is
/// the tie-break ordering.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

/// u16 isomorphism
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n)
    }
}

/// Vec<Rank> isomorphism, highest rank first
///
/// [2c, Ts, Jc, Js, Jd, Jh]
/// xxx 0001100000001
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|r| k.0 & u16::from(*r) != 0)
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0u16, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_ranks() {
        let kicks = Kickers::from(vec![Rank::Two, Rank::King, Rank::Nine]);
        assert_eq!(Vec::<Rank>::from(kicks), vec![Rank::King, Rank::Nine, Rank::Two]);
    }

    #[test]
    fn lexicographic_order() {
        let a = Kickers::from(vec![Rank::King, Rank::Three, Rank::Two]);
        let b = Kickers::from(vec![Rank::Queen, Rank::Jack, Rank::Ten]);
        assert!(a > b);
    }
}
