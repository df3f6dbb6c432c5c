use super::node::Node;
use super::role::Role;
use super::settings::Budget;
use super::settings::Report;
use super::settings::Settings;
use super::stage::Selection;
use super::stage::Stage;
use crate::Probability;
use crate::betting::action::Action;
use crate::betting::context::Context;
use crate::betting::seat::Seat;
use crate::betting::seating::Seating;
use crate::cards::context::CardContext;
use crate::cards::phase::Phase;
use crate::simulation::simulator::Simulator;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde::Serialize;
use std::time::Instant;

/// Per-action state of a node's child, for the hand being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// missing, or never reached by this hand
    Unfulfilled,
    /// reached and still open
    Fulfilled(NodeIndex),
    /// exhausted for this hand, or the hand ends there
    Closed,
}

/// Monte Carlo search over the betting lines of one seating.
///
/// Nodes live in a petgraph arena with action-labeled edges pointing
/// downward. The single incoming edge of every non-root node is the parent
/// link, so walking up never needs a second owner.
///
/// The tree persists across hands. Each build or query works on behalf of
/// one hand and only reads and writes statistics keyed by it, so nodes
/// explored for other hands are reused without contaminating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTree {
    seating: Seating,
    settings: Settings,
    graph: DiGraph<Node, Action>,
    root: NodeIndex,
    #[serde(skip)]
    current: Option<CardContext>,
}

impl SearchTree {
    pub fn new(seating: &Seating, settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        anyhow::ensure!(
            seating.contains(&Seat::Hero),
            "seating {} has no hero to search for",
            seating
        );
        let mut graph = DiGraph::new();
        let root = graph.add_node(Node::root(0, Context::new(seating))?);
        Ok(Self {
            seating: seating.clone(),
            settings,
            graph,
            root,
            current: None,
        })
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    /// the hand most recently built for
    pub fn current(&self) -> Option<&CardContext> {
        self.current.as_ref()
    }
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }
    pub fn node(&self, ix: NodeIndex) -> &Node {
        self.graph
            .node_weight(ix)
            .expect("node indices are never removed")
    }
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.graph
            .node_indices()
            .map(move |ix| (ix, &self.graph[ix]))
    }
    pub fn parent(&self, ix: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(ix, Incoming).next()
    }
    pub fn child(&self, ix: NodeIndex, action: Action) -> Option<NodeIndex> {
        self.graph
            .edges_directed(ix, Outgoing)
            .find(|e| *e.weight() == action)
            .map(|e| e.target())
    }
    pub fn children(&self, ix: NodeIndex) -> Vec<(Action, NodeIndex)> {
        let mut children = self
            .graph
            .edges_directed(ix, Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        children.sort();
        children
    }
    pub fn depth(&self, ix: NodeIndex) -> usize {
        std::iter::successors(Some(ix), |ix| self.parent(*ix)).count() - 1
    }
    pub fn stats(&self, ix: NodeIndex, hand: &CardContext) -> (u32, u32) {
        self.node(ix).stats(hand)
    }
    /// win ratio per legal action at a node, none where this hand
    /// has no statistics yet
    pub fn grades(&self, ix: NodeIndex, hand: &CardContext) -> Vec<(Action, Option<Probability>)> {
        self.node(ix)
            .legal()
            .iter()
            .map(|a| (*a, self.child(ix, *a).and_then(|c| self.node(c).ratio(hand))))
            .collect()
    }

    /// grow the tree for one hand from a given node until the budget runs
    /// out or every line below the node is exhausted for that hand.
    pub fn build<R: Rng>(
        &mut self,
        hand: &CardContext,
        from: NodeIndex,
        budget: Budget,
        rng: &mut R,
    ) -> anyhow::Result<Report> {
        self.settings.validate()?;
        anyhow::ensure!(
            budget.time >= self.settings.floor,
            "compute time {:?} is below the {:?} floor",
            budget.time,
            self.settings.floor
        );
        anyhow::ensure!(budget.nodes > 0, "node budget must be positive");
        let start = self
            .graph
            .node_weight(from)
            .ok_or_else(|| anyhow::anyhow!("no node {} in tree", from.index()))?;
        anyhow::ensure!(!start.terminal(), "cannot build from a decided hand");
        self.current = Some(hand.clone());
        let clock = Instant::now();
        let mut iterations = 0;
        let mut exhausted = false;
        while iterations < budget.nodes && clock.elapsed() < budget.time {
            match self.select(hand, from, rng)? {
                Selection::Done => {
                    exhausted = true;
                    break;
                }
                Selection::Expand(ix) => {
                    let stages = self.simulate(ix, hand, rng)?;
                    self.back_propagate(ix, &stages);
                    iterations += 1;
                }
            }
        }
        let report = Report {
            iterations,
            exhausted,
            elapsed: clock.elapsed(),
        };
        log::debug!("built {} from #{}: {}", hand, self.node(from).id(), report);
        Ok(report)
    }

    /// descend from a start node to the next node worth simulating.
    ///
    /// Unreached actions are tried first, in random order. Once all are
    /// reached, UCB1 over the open children picks the line to follow.
    /// Nodes whose actions are all closed become leaves for this hand and
    /// hand control back to their parent.
    pub fn select<R: Rng>(
        &mut self,
        hand: &CardContext,
        start: NodeIndex,
        rng: &mut R,
    ) -> anyhow::Result<Selection> {
        let mut ix = start;
        loop {
            let slots = self.slots(ix, hand);
            if slots.iter().all(|(_, s)| *s == Slot::Closed) {
                self.graph[ix].set_leaf(hand, true);
                if ix == start || ix == self.root {
                    return Ok(Selection::Done);
                }
                ix = self.parent(ix).expect("non-root nodes have a parent");
                continue;
            }
            let unfulfilled = slots
                .iter()
                .filter(|(_, s)| *s == Slot::Unfulfilled)
                .map(|(a, _)| *a)
                .collect::<Vec<_>>();
            if let Some(action) = unfulfilled.choose(rng).copied() {
                return match self.child(ix, action) {
                    Some(child) => {
                        let terminal = self.graph[child].terminal();
                        self.graph[child].set_leaf(hand, terminal);
                        Ok(Selection::Expand(child))
                    }
                    None => self.spawn(ix, action, hand).map(Selection::Expand),
                };
            }
            ix = self.ucb(ix, &slots, hand);
        }
    }

    /// roll out a freshly reached node for this hand.
    ///
    /// Hero's own calls and bets are credited with win odds against the
    /// seats still in: once before the flop, or once per random board
    /// completion afterwards. Every other node only records that the hand
    /// passed through.
    pub fn simulate<R: Rng>(
        &self,
        ix: NodeIndex,
        hand: &CardContext,
        rng: &mut R,
    ) -> anyhow::Result<Vec<Stage>> {
        let node = self.node(ix);
        let opponents = node.context().opponents();
        match (node.role(), node.action()) {
            (Role::Seat(Seat::Hero), Some(action)) if action != Action::Fold => {
                match node.phase() {
                    Phase::Pref => {
                        let key = hand.truncate(Phase::Pref.slots());
                        let odds = Simulator::new(key.hole(), key.board(), opponents)?
                            .simulate(self.settings.trials, rng)?;
                        Ok(vec![Stage::from((key, odds))])
                    }
                    phase => (0..self.settings.branching)
                        .map(|_| {
                            let key = hand.complete(phase, rng);
                            Simulator::new(key.hole(), key.board(), opponents)?
                                .simulate(self.settings.trials, rng)
                                .map(|odds| Stage::from((key, odds)))
                        })
                        .collect(),
                }
            }
            _ => Ok(vec![Stage::empty(hand.truncate(node.slots()))]),
        }
    }

    /// credit staged results to a node and every ancestor up to the root.
    /// returns how many nodes were touched.
    pub fn back_propagate(&mut self, ix: NodeIndex, stages: &[Stage]) -> usize {
        let mut touched = 0;
        let mut cursor = Some(ix);
        while let Some(ix) = cursor {
            for stage in stages {
                self.graph[ix].credit(stage);
            }
            touched += 1;
            cursor = self.parent(ix);
        }
        log::trace!("propagated {} stage(s) through {} nodes", stages.len(), touched);
        touched
    }

    /// replay the real actions of a hand from the root and return the
    /// node they lead to. nodes met for the first time by this hand are
    /// created if needed and simulated once.
    pub fn query<R: Rng>(
        &mut self,
        hand: &CardContext,
        history: &[(Seat, Action)],
        rng: &mut R,
    ) -> anyhow::Result<NodeIndex> {
        let mut ix = self.root;
        for (step, (seat, action)) in history.iter().enumerate() {
            let node = self.node(ix);
            anyhow::ensure!(
                !node.terminal(),
                "step {}: {} {} after the hand was decided",
                step,
                seat,
                action
            );
            anyhow::ensure!(
                node.context().actor() == Some(*seat),
                "step {}: expected {} to act, not {}",
                step,
                node.context().actor().map(|s| s.to_string()).unwrap_or_default(),
                seat
            );
            anyhow::ensure!(
                node.legal().contains(action),
                "step {}: {} may not {} at {}",
                step,
                seat,
                action,
                node.phase()
            );
            ix = match self.child(ix, *action) {
                Some(child) if self.node(child).seen(hand) => child,
                Some(child) => {
                    let terminal = self.node(child).terminal();
                    self.graph[child].set_leaf(hand, terminal);
                    let stages = self.simulate(child, hand, rng)?;
                    self.back_propagate(child, &stages);
                    child
                }
                None => {
                    let child = self.spawn(ix, *action, hand)?;
                    let stages = self.simulate(child, hand, rng)?;
                    self.back_propagate(child, &stages);
                    child
                }
            };
        }
        Ok(ix)
    }

    fn spawn(
        &mut self,
        ix: NodeIndex,
        action: Action,
        hand: &CardContext,
    ) -> anyhow::Result<NodeIndex> {
        let parent = self.node(ix);
        let seat = parent
            .context()
            .actor()
            .ok_or_else(|| anyhow::anyhow!("no seat to act at #{}", parent.id()))?;
        let context = parent.context().step(action)?;
        let id = self.graph.node_count();
        let mut node = Node::new(id, context, Role::Seat(seat), Some(action))?;
        if node.terminal() {
            node.set_leaf(hand, true);
        }
        log::debug!("spawned {}", node);
        let child = self.graph.add_node(node);
        self.graph.add_edge(ix, child, action);
        Ok(child)
    }

    fn slots(&self, ix: NodeIndex, hand: &CardContext) -> Vec<(Action, Slot)> {
        self.node(ix)
            .legal()
            .iter()
            .map(|a| match self.child(ix, *a) {
                None => (*a, Slot::Unfulfilled),
                Some(c) => {
                    let child = self.node(c);
                    let leaf = child.leaf(hand);
                    if !leaf && !child.seen(hand) {
                        (*a, Slot::Unfulfilled)
                    } else if leaf || child.terminal() {
                        (*a, Slot::Closed)
                    } else {
                        (*a, Slot::Fulfilled(c))
                    }
                }
            })
            .collect()
    }

    /// the open child with the best UCB1 score, ties going to
    /// call, then bet, then fold
    fn ucb(&self, ix: NodeIndex, slots: &[(Action, Slot)], hand: &CardContext) -> NodeIndex {
        let (_, n) = self.stats(ix, hand);
        let n = n.max(1) as Probability;
        slots
            .iter()
            .filter_map(|(a, s)| match s {
                Slot::Fulfilled(c) => Some((*a, *c)),
                _ => None,
            })
            .map(|(a, c)| {
                let (w, t) = self.stats(c, hand);
                let t = t.max(1) as Probability;
                let score = w as Probability / t + self.settings.exploration * (n.ln() / t).sqrt();
                (a, c, score)
            })
            .max_by(|(a, _, x), (b, _, y)| {
                x.partial_cmp(y)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.preference().cmp(&b.preference()))
            })
            .map(|(_, c, _)| c)
            .expect("a node with no unfulfilled and some open actions has an open child")
    }
}
