use super::action::Action;
use super::seat::Seat;
use super::seating::Seating;
use crate::MAX_BID_ROUNDS;
use crate::cards::phase::Phase;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// bid count marking a seat that folded this hand
pub const FOLDED: u8 = u8::MAX;

/// The state of one limit betting round, as a value.
///
/// Every transition returns a fresh copy, so a search node can hold the
/// context that produced it while its children evolve their own.
///
/// A phase plays in laps: each active seat acts once per lap, and the
/// `bids` map counts the laps a seat has called or bet in. The phase ends
/// at a lap boundary where nobody is short, which is when every active
/// seat has acted, every bid count agrees, and the only bets on record
/// belong to the seat about to open the next lap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    seating: Seating,
    turn: Vec<Seat>,
    last: BTreeMap<Seat, Option<Action>>,
    bids: BTreeMap<Seat, u8>,
    phase: Phase,
}

impl Context {
    pub fn new(seating: &Seating) -> Self {
        Self {
            seating: seating.clone(),
            turn: seating.preflop(),
            last: seating.seats().iter().map(|s| (*s, None)).collect(),
            bids: seating.seats().iter().map(|s| (*s, 0)).collect(),
            phase: Phase::Pref,
        }
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// active seats, next to act first
    pub fn turn(&self) -> &[Seat] {
        &self.turn
    }
    pub fn actor(&self) -> Option<Seat> {
        self.turn.first().copied()
    }
    pub fn last(&self, seat: &Seat) -> Option<Action> {
        self.last.get(seat).copied().flatten()
    }
    pub fn bids(&self, seat: &Seat) -> u8 {
        self.bids.get(seat).copied().unwrap_or(FOLDED)
    }
    pub fn folded(&self, seat: &Seat) -> bool {
        self.bids(seat) == FOLDED
    }
    pub fn opponents(&self) -> usize {
        self.turn.len().saturating_sub(1)
    }

    /// hand over: one seat left, or showdown reached
    pub fn terminal(&self) -> bool {
        self.turn.len() <= 1 || self.phase == Phase::Show
    }

    /// whether the seat to act may still raise this phase
    pub fn can_bet(&self) -> bool {
        self.actor()
            .map(|seat| self.bids(&seat) < MAX_BID_ROUNDS - 1)
            .unwrap_or(false)
    }

    /// fold and call always, bet until the raise cap.
    pub fn legal(&self) -> anyhow::Result<Vec<Action>> {
        anyhow::ensure!(
            self.turn.len() > 1,
            "no decision with {} active seat(s)",
            self.turn.len()
        );
        anyhow::ensure!(self.phase.is_betting(), "no betting at {}", self.phase);
        match self.can_bet() {
            true => Ok(vec![Action::Fold, Action::Call, Action::Bet]),
            false => Ok(vec![Action::Fold, Action::Call]),
        }
    }

    /// the acting seat takes an action. the receiver is left untouched.
    pub fn apply(&self, action: Action) -> anyhow::Result<Self> {
        anyhow::ensure!(
            self.legal()?.contains(&action),
            "{} is not legal for {} at {}",
            action,
            self.turn[0],
            self.phase
        );
        let mut next = self.clone();
        let seat = next.turn[0];
        next.last.insert(seat, Some(action));
        match action {
            Action::Fold => {
                next.turn.remove(0);
                next.bids.insert(seat, FOLDED);
            }
            Action::Call | Action::Bet => {
                *next.bids.entry(seat).or_default() += 1;
                next.turn.rotate_left(1);
            }
        }
        Ok(next)
    }

    /// every active seat has matched the latest bet at a lap boundary
    pub fn complete(&self) -> bool {
        let opener = match self.turn.first() {
            Some(seat) => seat,
            None => return false,
        };
        let acted = self
            .turn
            .iter()
            .all(|s| matches!(self.last(s), Some(Action::Call | Action::Bet)));
        let level = self.bids(opener);
        let matched = self.turn.iter().all(|s| self.bids(s) == level);
        let settled = self
            .turn
            .iter()
            .filter(|s| self.last(s) == Some(Action::Bet))
            .all(|s| s == opener);
        acted && matched && settled
    }

    /// reset active seats and move to the next card phase.
    /// post-flop phases reorder the survivors blinds first.
    pub fn advance(&self) -> Self {
        let mut next = self.clone();
        next.phase = self.phase.next();
        for seat in self.turn.iter() {
            next.last.insert(*seat, None);
            next.bids.insert(*seat, 0);
        }
        if next.phase.is_betting() {
            next.turn = self
                .seating
                .postflop()
                .into_iter()
                .filter(|s| self.turn.contains(s))
                .collect();
        }
        next
    }

    /// apply, then advance the phase if the action closed it
    pub fn step(&self, action: Action) -> anyhow::Result<Self> {
        let next = self.apply(action)?;
        if next.turn.len() > 1 && next.complete() {
            log::trace!("{} closed after {} {}", next.phase, self.turn[0], action);
            Ok(next.advance())
        } else {
            Ok(next)
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<9}", self.phase)?;
        for seat in self.turn.iter() {
            match self.last(seat) {
                Some(action) => write!(f, " {}:{}/{}", seat, action, self.bids(seat))?,
                None => write!(f, " {}:-/{}", seat, self.bids(seat))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: Seat = Seat::Hero;
    const V0: Seat = Seat::Villain(0);
    const V1: Seat = Seat::Villain(1);

    fn play(context: &Context, actions: &[Action]) -> Context {
        actions
            .iter()
            .fold(context.clone(), |c, a| c.step(*a).unwrap())
    }

    #[test]
    fn calls_close_preflop() {
        let start = Context::new(&Seating::heads_up());
        assert_eq!(start.actor(), Some(V0));
        let flop = play(&start, &[Action::Call, Action::Call]);
        assert_eq!(flop.phase(), Phase::Flop);
        assert_eq!(flop.turn(), &[V0, H]);
        assert_eq!(flop.bids(&H), 0);
        assert_eq!(flop.last(&V0), None);
    }

    #[test]
    fn called_bet_closes_phase() {
        let start = Context::new(&Seating::heads_up());
        let flop = play(&start, &[Action::Bet, Action::Call]);
        assert_eq!(flop.phase(), Phase::Flop);
    }

    #[test]
    fn late_bet_forces_another_lap() {
        let start = Context::new(&Seating::heads_up());
        let context = play(&start, &[Action::Call, Action::Bet, Action::Call]);
        assert_eq!(context.phase(), Phase::Pref);
        assert_eq!(context.actor(), Some(H));
        let flop = context.step(Action::Call).unwrap();
        assert_eq!(flop.phase(), Phase::Flop);
    }

    #[test]
    fn third_lap_cannot_bet() {
        let start = Context::new(&Seating::heads_up());
        let context = play(&start, &[Action::Call, Action::Bet, Action::Bet]);
        assert_eq!(context.phase(), Phase::Pref);
        assert_eq!(context.actor(), Some(H));
        assert_eq!(context.bids(&H), 1);
        assert!(context.can_bet());
        let context = context.step(Action::Bet).unwrap();
        assert_eq!(context.bids(&V0), 2);
        assert_eq!(context.legal().unwrap(), vec![Action::Fold, Action::Call]);
        assert!(context.apply(Action::Bet).is_err());
        let context = play(&context, &[Action::Call]);
        assert_eq!(context.phase(), Phase::Pref);
        let flop = play(&context, &[Action::Call]);
        assert_eq!(flop.phase(), Phase::Flop);
    }

    #[test]
    fn every_line_ends_within_three_laps() {
        // always bet when allowed: the cap still closes every phase
        let mut context = Context::new(&Seating::try_from("V0,V1,H").unwrap());
        let mut steps = 0;
        while !context.terminal() {
            let action = match context.can_bet() {
                true => Action::Bet,
                false => Action::Call,
            };
            context = context.step(action).unwrap();
            steps += 1;
        }
        assert_eq!(context.phase(), Phase::Show);
        assert!(steps <= 4 * 3 * 3);
    }

    #[test]
    fn fold_removes_seat() {
        let start = Context::new(&Seating::try_from("V0,V1,H").unwrap());
        let context = start.step(Action::Fold).unwrap();
        assert!(context.folded(&V0));
        assert_eq!(context.turn(), &[V1, H]);
        assert_eq!(context.opponents(), 1);
        let context = play(&context, &[Action::Call, Action::Call]);
        assert_eq!(context.phase(), Phase::Flop);
        assert_eq!(context.turn(), &[V1, H]);
    }

    #[test]
    fn opener_folding_to_a_bet_closes() {
        let start = Context::new(&Seating::try_from("V0,V1,H").unwrap());
        let context = play(&start, &[Action::Call, Action::Bet, Action::Call, Action::Fold]);
        assert_eq!(context.phase(), Phase::Flop);
        assert_eq!(context.turn(), &[V1, H]);
    }

    #[test]
    fn last_survivor_is_terminal() {
        let start = Context::new(&Seating::heads_up());
        let context = start.step(Action::Fold).unwrap();
        assert!(context.terminal());
        assert_eq!(context.phase(), Phase::Pref);
        assert!(context.legal().is_err());
        assert!(context.apply(Action::Call).is_err());
    }

    #[test]
    fn postflop_order_blinds_first() {
        let start = Context::new(&Seating::try_from("V0,V1,H").unwrap());
        assert_eq!(start.turn(), &[V0, V1, H]);
        let flop = play(&start, &[Action::Call, Action::Call, Action::Call]);
        assert_eq!(flop.turn(), &[V1, H, V0]);
    }

    #[test]
    fn transitions_copy() {
        let start = Context::new(&Seating::heads_up());
        let _ = start.step(Action::Bet).unwrap();
        assert_eq!(start, Context::new(&Seating::heads_up()));
    }
}
