use super::role::Role;
use super::stage::Stage;
use crate::Probability;
use crate::betting::action::Action;
use crate::betting::context::Context;
use crate::cards::context::CardContext;
use crate::cards::phase::Phase;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// One betting-action path through a hand, shared by every hand that
/// follows it.
///
/// Statistics are keyed by the card context truncated to this node's
/// phase. Hands that know fewer cards than that are stored under their
/// own, shorter context, and lookups for them pool every key extending it.
/// Leaf flags are keyed by the exact hand a build was run for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    context: Context,
    role: Role,
    action: Option<Action>,
    legal: Vec<Action>,
    terminal: bool,
    leaves: HashMap<CardContext, bool>,
    wins: HashMap<CardContext, u32>,
    totals: HashMap<CardContext, u32>,
}

impl Node {
    pub fn root(id: usize, context: Context) -> anyhow::Result<Self> {
        Self::new(id, context, Role::Start, None)
    }

    pub fn new(
        id: usize,
        context: Context,
        role: Role,
        action: Option<Action>,
    ) -> anyhow::Result<Self> {
        let terminal = context.terminal();
        let legal = match terminal {
            true => vec![],
            false => context.legal()?,
        };
        Ok(Self {
            id,
            context,
            role,
            action,
            legal,
            terminal,
            leaves: HashMap::new(),
            wins: HashMap::new(),
            totals: HashMap::new(),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn context(&self) -> &Context {
        &self.context
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn action(&self) -> Option<Action> {
        self.action
    }
    /// actions open to the next seat. empty once the hand is decided
    pub fn legal(&self) -> &[Action] {
        &self.legal
    }
    pub fn terminal(&self) -> bool {
        self.terminal
    }
    pub fn phase(&self) -> Phase {
        self.context.phase()
    }
    pub fn slots(&self) -> usize {
        self.phase().slots()
    }
    pub fn keys(&self) -> impl Iterator<Item = &CardContext> {
        self.totals.keys()
    }

    pub fn leaf(&self, hand: &CardContext) -> bool {
        self.leaves.get(hand).copied().unwrap_or(false)
    }
    pub fn set_leaf(&mut self, hand: &CardContext, leaf: bool) {
        self.leaves.insert(hand.clone(), leaf);
    }

    /// whether any statistic for this hand has reached the node
    pub fn seen(&self, hand: &CardContext) -> bool {
        match hand.len() >= self.slots() {
            true => self.totals.contains_key(&hand.truncate(self.slots())),
            false => self.totals.keys().any(|k| k.starts_with(hand)),
        }
    }

    /// (wins, totals) for this hand
    pub fn stats(&self, hand: &CardContext) -> (u32, u32) {
        match hand.len() >= self.slots() {
            true => {
                let ref key = hand.truncate(self.slots());
                (
                    self.wins.get(key).copied().unwrap_or(0),
                    self.totals.get(key).copied().unwrap_or(0),
                )
            }
            false => self
                .totals
                .iter()
                .filter(|(k, _)| k.starts_with(hand))
                .map(|(k, t)| (self.wins.get(k).copied().unwrap_or(0), *t))
                .fold((0, 0), |(w, t), (dw, dt)| (w + dw, t + dt)),
        }
    }

    /// win ratio for this hand, none if nothing was credited
    pub fn ratio(&self, hand: &CardContext) -> Option<Probability> {
        match self.stats(hand) {
            (_, 0) => None,
            (w, t) => Some(w as Probability / t as Probability),
        }
    }

    pub fn credit(&mut self, stage: &Stage) {
        let key = stage.key.truncate(self.slots());
        *self.wins.entry(key.clone()).or_default() += stage.wins;
        *self.totals.entry(key).or_default() += stage.totals;
    }

    /// every win count has a total, and never exceeds it
    pub fn consistent(&self) -> bool {
        self.wins
            .iter()
            .all(|(k, w)| self.totals.get(k).is_some_and(|t| w <= t))
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:<5} {:<5}", self.id, self.role)?;
        match self.action {
            Some(action) => write!(f, " {:<4}", action)?,
            None => write!(f, " {:<4}", "-")?,
        }
        write!(f, " {}", self.context)?;
        if self.terminal {
            write!(f, " (end)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::seat::Seat;
    use crate::betting::seating::Seating;

    fn flop_node() -> Node {
        let context = Context::new(&Seating::heads_up())
            .step(Action::Call)
            .and_then(|c| c.step(Action::Call))
            .unwrap();
        Node::new(1, context, Role::Seat(Seat::Hero), Some(Action::Call)).unwrap()
    }

    fn hand(s: &str) -> CardContext {
        CardContext::try_from(s).unwrap()
    }

    #[test]
    fn credit_truncates_to_phase() {
        let mut node = flop_node();
        assert_eq!(node.slots(), 5);
        node.credit(&Stage {
            key: hand("AsKd~2c3c4cJhQh"),
            wins: 3,
            totals: 5,
        });
        assert_eq!(node.keys().next().unwrap(), &hand("AsKd~2c3c4c"));
        assert_eq!(node.stats(&hand("AsKd~2c3c4c9s")), (3, 5));
        assert!(node.consistent());
    }

    #[test]
    fn shorter_hands_pool_extensions() {
        let mut node = flop_node();
        for (key, wins) in [("AsKd~2c3c4c", 1), ("AsKd~5h6h7h", 2), ("QsQd~5h6h7h", 4)] {
            node.credit(&Stage {
                key: hand(key),
                wins,
                totals: 10,
            });
        }
        assert_eq!(node.stats(&hand("AsKd")), (3, 20));
        assert!(node.seen(&hand("KdAs")));
        assert!(!node.seen(&hand("2s2d")));
        assert_eq!(node.ratio(&hand("QsQd")), Some(0.4));
        assert_eq!(node.ratio(&hand("2s2d")), None);
    }

    #[test]
    fn empty_stage_marks_seen() {
        let mut node = flop_node();
        node.credit(&Stage::empty(hand("AsKd")));
        assert!(node.seen(&hand("AsKd")));
        assert_eq!(node.stats(&hand("AsKd")), (0, 0));
    }

    #[test]
    fn terminal_nodes_have_no_actions() {
        let context = Context::new(&Seating::heads_up())
            .step(Action::Fold)
            .unwrap();
        let role = Role::Seat(Seat::Villain(0));
        let node = Node::new(1, context, role, Some(Action::Fold)).unwrap();
        assert!(node.terminal());
        assert!(node.legal().is_empty());
    }
}
