use super::choice::Choice;
use super::player::Player;
use super::purse::Purse;
use super::spot::Spot;
use crate::Chips;
use crate::RAISE;
use crate::betting::action::Action;
use crate::betting::seat::Seat;
use crate::betting::seating::Seating;
use crate::search::set::SearchTreeSet;
use crate::search::settings::Budget;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The tree-search agent.
///
/// It replays the real actions of the hand through the tree for its
/// seating, spends its budget growing the tree below that point for its
/// own cards. It folds when its equity at that point does not pay for the
/// chips already committed, otherwise it takes the line that has won most.
#[derive(Debug)]
pub struct SearchPlayer {
    forest: SearchTreeSet,
    seating: Option<Seating>,
    history: Vec<(Seat, Action)>,
    budget: Budget,
    purse: Purse,
    rng: SmallRng,
}

impl SearchPlayer {
    pub fn new(forest: SearchTreeSet, budget: Budget, balance: Chips, seed: u64) -> Self {
        Self {
            forest,
            seating: None,
            history: Vec::new(),
            budget,
            purse: Purse::new(balance),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn forest(&self) -> &SearchTreeSet {
        &self.forest
    }
    pub fn purse(&self) -> &Purse {
        &self.purse
    }
    pub fn history(&self) -> &[(Seat, Action)] {
        &self.history
    }

    /// pick an action for this spot without touching the purse
    pub fn decide(&mut self, spot: &Spot) -> anyhow::Result<Action> {
        if spot.opponents == 0 {
            return Ok(Action::Call);
        }
        let seating = self
            .seating
            .clone()
            .ok_or_else(|| anyhow::anyhow!("asked to act before the hand began"))?;
        let ref hand = spot.context()?;
        let tree = self.forest.tree(&seating)?;
        let ix = tree.query(hand, &self.history, &mut self.rng)?;
        anyhow::ensure!(
            tree.node(ix).context().actor() == Some(Seat::Hero),
            "asked to act out of turn at {}",
            tree.node(ix)
        );
        let report = tree.build(hand, ix, self.budget, &mut self.rng)?;
        let grades = tree.grades(ix, hand);
        let equity = tree.node(ix).ratio(hand);
        log::debug!("{} at #{} after {}: {:?}", hand, tree.node(ix).id(), report, grades);
        let action = Choice::settle(&grades, equity, spot.pot, spot.bid).unwrap_or(Action::Call);
        let action = match action {
            Action::Bet if !spot.raise_allowed => Action::Call,
            action => action,
        };
        Ok(action)
    }
}

impl Player for SearchPlayer {
    fn make_bet(&mut self, spot: &Spot) -> anyhow::Result<Option<Chips>> {
        match self.decide(spot)? {
            Action::Fold => Ok(self.purse.fold_bet()),
            Action::Call => self.purse.call_bet(spot),
            Action::Bet => self.purse.raise_bet(spot, RAISE),
        }
    }
    fn begin(&mut self, seating: &Seating) {
        self.seating = Some(seating.clone());
        self.history.clear();
    }
    fn observe(&mut self, seat: Seat, action: Action) {
        self.history.push((seat, action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::search::settings::Settings;
    use std::time::Duration;

    fn player(balance: Chips) -> SearchPlayer {
        let settings = Settings {
            trials: 20,
            branching: 1,
            ..Settings::default()
        };
        let budget = Budget {
            time: Duration::from_secs(10),
            nodes: 150,
        };
        SearchPlayer::new(SearchTreeSet::new(settings).unwrap(), budget, balance, 7)
    }
    fn seated(seed: u64) -> SearchPlayer {
        let settings = Settings {
            trials: 20,
            branching: 1,
            ..Settings::default()
        };
        let budget = Budget {
            time: Duration::from_secs(10),
            nodes: 400,
        };
        SearchPlayer::new(SearchTreeSet::new(settings).unwrap(), budget, 100, seed)
    }
    fn spot(hand: &str, opponents: usize, raise_allowed: bool) -> Spot {
        Spot {
            hand: Card::parse(hand).unwrap(),
            board: vec![],
            opponents,
            call: 0,
            bid: 10,
            pot: 15,
            raise_allowed,
        }
    }

    #[test]
    fn aces_stay_in() {
        let mut player = player(100);
        player.begin(&Seating::heads_up());
        player.observe(Seat::Villain(0), Action::Call);
        let bet = player.make_bet(&spot("AhAs", 1, true)).unwrap();
        assert!(bet.is_some());
        assert_eq!(player.forest().len(), 1);
        assert!(player.forest().get(&Seating::heads_up()).unwrap().len() > 1);
    }

    #[test]
    fn no_raise_when_capped() {
        let mut player = player(100);
        player.begin(&Seating::heads_up());
        player.observe(Seat::Villain(0), Action::Call);
        let action = player.decide(&spot("AhAs", 1, false)).unwrap();
        assert_ne!(action, Action::Bet);
    }

    #[test]
    fn alone_calls_without_search() {
        let mut player = player(100);
        let bet = player.make_bet(&spot("7c2d", 0, true)).unwrap();
        assert_eq!(bet, Some(10));
        assert_eq!(player.forest().len(), 0);
    }

    #[test]
    fn must_begin_first() {
        let mut player = player(100);
        assert!(player.make_bet(&spot("AhAs", 1, true)).is_err());
    }

    #[test]
    fn out_of_turn_is_an_error() {
        let mut player = player(100);
        player.begin(&Seating::heads_up());
        assert!(player.decide(&spot("AhAs", 1, true)).is_err());
    }

    #[test]
    fn begin_resets_history() {
        let mut player = player(100);
        player.begin(&Seating::heads_up());
        player.observe(Seat::Villain(0), Action::Bet);
        player.begin(&Seating::heads_up());
        assert!(player.history().is_empty());
    }

    #[test]
    fn junk_folds_to_a_multiway_bet() {
        let seating = Seating::try_from("V0,V1,V2,V3,V4,H").unwrap();
        for seed in 0..5 {
            let mut player = seated(seed);
            player.begin(&seating);
            player.observe(Seat::Villain(0), Action::Bet);
            for i in 1..5 {
                player.observe(Seat::Villain(i), Action::Call);
            }
            let ref spot = spot("7c2d", 5, true);
            assert_eq!(player.decide(spot).unwrap(), Action::Fold, "seed {}", seed);
            assert_eq!(player.make_bet(spot).unwrap(), None);
            assert_eq!(player.purse().balance(), 100);
        }
    }
}
