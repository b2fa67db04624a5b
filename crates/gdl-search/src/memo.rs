use crate::SearchError;
use gdl_core::{JointMove, State};
use gdl_reasoner::Game;
use petgraph::graph::DiGraph;
use std::collections::HashMap;

/// Running Monte-Carlo statistics for one joint move taken at one state:
/// `totals[r]` accumulates role `r`'s goal value across every depth charge
/// run through this action, and `totals[num_roles]` is the charge count.
/// The lazily-memoized successor state is cached alongside once computed:
/// `next` is a pure function of `(state, move)`, so the first value
/// observed is final and never overwritten.
#[derive(Debug, Clone)]
pub struct EdgeStats {
    pub next: Option<State>,
    totals: Vec<u64>,
}

impl EdgeStats {
    fn new(num_roles: usize) -> Self {
        let mut totals = vec![0u64; num_roles + 1];
        totals[num_roles] = 1; // the seed count starts at one, never a virtual win
        EdgeStats { next: None, totals }
    }

    pub fn count(&self) -> u64 {
        *self.totals.last().unwrap()
    }

    pub fn mean(&self, role_index: usize) -> f64 {
        self.totals[role_index] as f64 / self.count() as f64
    }

    fn accumulate(&mut self, goals: &[u8]) {
        for (total, &g) in self.totals.iter_mut().zip(goals) {
            *total += g as u64;
        }
        *self.totals.last_mut().unwrap() += 1;
    }
}

#[derive(Debug, Clone, Default)]
struct NodeData {
    terminal: Option<bool>,
    goals: Option<Vec<u8>>,
    /// `None` until first expansion; once `Some`, the key set (the full
    /// Cartesian product of per-role legal actions) never changes again.
    actions: Option<HashMap<JointMove, EdgeStats>>,
}

/// The per-match state memo: one entry per canonical state ever visited,
/// holding cached terminal/goal facts and, once expanded, Monte-Carlo
/// statistics for every legal joint move at that state. Adapted from the
/// append-only sampling tree idiom of a canonical-state-keyed map: instead
/// of a tree that only ever grows forward, repeated states (a GDL state
/// graph need not be acyclic) fold back onto the same entry so charges
/// through a transposition all sharpen one estimate.
#[derive(Debug, Default)]
pub struct Tree {
    num_roles: usize,
    nodes: HashMap<State, NodeData>,
}

impl Tree {
    pub fn new(num_roles: usize) -> Self {
        Tree {
            num_roles,
            nodes: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn entry(&mut self, state: &State) -> &mut NodeData {
        self.nodes.entry(state.clone()).or_default()
    }

    pub fn terminal(&mut self, state: &State, game: &Game) -> Result<bool, SearchError> {
        if let Some(t) = self.entry(state).terminal {
            return Ok(t);
        }
        let t = game.terminal(state)?;
        self.entry(state).terminal = Some(t);
        Ok(t)
    }

    pub fn goals(&mut self, state: &State, game: &Game) -> Result<Vec<u8>, SearchError> {
        if let Some(g) = &self.entry(state).goals {
            return Ok(g.clone());
        }
        let mut goals = Vec::with_capacity(game.roles().len());
        for role in game.roles() {
            goals.push(game.goal(state, role)?);
        }
        self.entry(state).goals = Some(goals.clone());
        Ok(goals)
    }

    /// Populates the full set of joint moves available at `state`, seeded
    /// with fresh statistics. Idempotent: a node already expanded is left
    /// untouched, preserving its accumulated counts.
    pub fn expand(&mut self, state: &State, game: &Game) -> Result<(), SearchError> {
        if self.entry(state).actions.is_some() {
            return Ok(());
        }
        let moves = game.findmoves(state)?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let num_roles = self.num_roles;
        let actions = moves
            .into_iter()
            .map(|mv| (mv, EdgeStats::new(num_roles)))
            .collect();
        self.entry(state).actions = Some(actions);
        Ok(())
    }

    /// The joint moves available at `state`; expands the node first if
    /// necessary.
    pub fn action_keys(&mut self, state: &State, game: &Game) -> Result<Vec<JointMove>, SearchError> {
        self.expand(state, game)?;
        Ok(self
            .entry(state)
            .actions
            .as_ref()
            .unwrap()
            .keys()
            .cloned()
            .collect())
    }

    /// The successor state reached by taking `mv` at `state`, computing and
    /// caching it on first use.
    pub fn next_state(
        &mut self,
        state: &State,
        mv: &JointMove,
        game: &Game,
    ) -> Result<State, SearchError> {
        self.expand(state, game)?;
        let cached = self
            .entry(state)
            .actions
            .as_ref()
            .and_then(|m| m.get(mv))
            .and_then(|e| e.next.clone());
        if let Some(next) = cached {
            return Ok(next);
        }
        let next = game.next(state, mv)?;
        if let Some(edge) = self
            .entry(state)
            .actions
            .as_mut()
            .and_then(|m| m.get_mut(mv))
        {
            edge.next = Some(next.clone());
        }
        Ok(next)
    }

    pub fn accumulate(&mut self, state: &State, mv: &JointMove, goals: &[u8]) {
        if let Some(edge) = self
            .entry(state)
            .actions
            .as_mut()
            .and_then(|m| m.get_mut(mv))
        {
            edge.accumulate(goals);
        }
    }

    pub fn stats(&self, state: &State, mv: &JointMove) -> Option<&EdgeStats> {
        self.nodes.get(state)?.actions.as_ref()?.get(mv)
    }

    /// Renders the visited portion of the tree as a Graphviz DOT graph, one
    /// node per canonical state, one edge per expanded joint move, labelled
    /// with its Monte-Carlo charge count. Used for the CLI's `--graphviz` dump.
    pub fn to_dot(&self) -> String {
        let mut graph = DiGraph::<String, String>::new();
        let mut indices = HashMap::new();
        for state in self.nodes.keys() {
            let label = format!("{}", state);
            let idx = graph.add_node(label);
            indices.insert(state.clone(), idx);
        }
        for (state, data) in &self.nodes {
            let Some(actions) = &data.actions else { continue };
            let from = indices[state];
            for (mv, edge) in actions {
                let Some(next) = &edge.next else { continue };
                let Some(&to) = indices.get(next) else { continue };
                let label = format!("{:?} (n={})", mv, edge.count());
                graph.add_edge(from, to, label);
            }
        }
        format!("{}", petgraph::dot::Dot::with_config(&graph, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_core::{Clause, RuleDatabase, Term};

    fn single_role_game() -> Game {
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("a")],
            )),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("b")],
            )),
        ]);
        Game::new(db)
    }

    #[test]
    fn expand_is_idempotent_after_accumulation() {
        let game = single_role_game();
        let mut tree = Tree::new(1);
        let state = State::empty();
        tree.expand(&state, &game).unwrap();
        let mv = vec![Term::atom("a")];
        tree.accumulate(&state, &mv, &[7]);
        tree.expand(&state, &game).unwrap();
        assert_eq!(tree.stats(&state, &mv).unwrap().count(), 2);
    }

    #[test]
    fn next_state_is_memoized_write_once() {
        let game = single_role_game();
        let mut tree = Tree::new(1);
        let state = State::empty();
        let mv = vec![Term::atom("a")];
        let first = tree.next_state(&state, &mv, &game).unwrap();
        let second = tree.next_state(&state, &mv, &game).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mean_reflects_accumulated_goals() {
        let game = single_role_game();
        let mut tree = Tree::new(1);
        let state = State::empty();
        let mv = vec![Term::atom("a")];
        tree.expand(&state, &game).unwrap();
        tree.accumulate(&state, &mv, &[100]);
        tree.accumulate(&state, &mv, &[0]);
        // seed count is 1 with total 0, plus two charges of 100 and 0.
        assert_eq!(tree.stats(&state, &mv).unwrap().mean(0), 100.0 / 3.0);
    }
}
