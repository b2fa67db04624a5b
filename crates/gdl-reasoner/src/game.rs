use crate::{Context, ReasonerError};
use gdl_core::{JointMove, RuleDatabase, State, Term};

/// Immutable game descriptor built once at START: role order and the
/// rule database every query is derived against.
#[derive(Debug, Clone)]
pub struct Game {
    roles: Vec<Term>,
    db: RuleDatabase,
}

impl Game {
    pub fn new(db: RuleDatabase) -> Self {
        let roles = db
            .clauses_of("role")
            .iter()
            .filter_map(|c| c.head.args().first().cloned())
            .collect();
        Game { roles, db }
    }

    /// The arguments of each `role/1` fact, in declaration order (stable,
    /// cached at construction since it never changes within a match).
    pub fn roles(&self) -> &[Term] {
        &self.roles
    }

    pub fn role_index(&self, role: &Term) -> Option<usize> {
        self.roles.iter().position(|r| r == role)
    }

    fn context<'a>(&'a self, state: &'a State, mv: Option<&'a JointMove>) -> Context<'a> {
        Context::new(&self.db, state, &self.roles, mv)
    }

    /// The canonicalized set of ground `p` such that `init(p)` holds with
    /// empty state and empty move.
    pub fn init(&self) -> Result<State, ReasonerError> {
        let empty = State::empty();
        let mut ctx = self.context(&empty, None);
        let inits = ctx
            .derive("init")?
            .into_iter()
            .map(|t| t.args()[0].clone())
            .collect();
        Ok(State::canonicalize(inits))
    }

    /// Ground `(role, action)` pairs that hold under `state`.
    pub fn legal(&self, state: &State) -> Result<Vec<(Term, Term)>, ReasonerError> {
        let mut ctx = self.context(state, None);
        let pairs = ctx
            .derive("legal")?
            .into_iter()
            .map(|t| (t.args()[0].clone(), t.args()[1].clone()))
            .collect();
        Ok(pairs)
    }

    /// The Cartesian product over roles of each role's legal actions, in a
    /// deterministic order (sorted by each component). A role with no
    /// satisfied `legal` still gets a move: the canonical filler `noop`.
    pub fn findmoves(&self, state: &State) -> Result<Vec<JointMove>, ReasonerError> {
        let legal = self.legal(state)?;
        let mut per_role: Vec<Vec<Term>> = self
            .roles
            .iter()
            .map(|r| {
                let mut actions: Vec<Term> = legal
                    .iter()
                    .filter(|(role, _)| role == r)
                    .map(|(_, a)| a.clone())
                    .collect();
                actions.sort();
                actions.dedup();
                if actions.is_empty() {
                    actions.push(Term::atom("noop"));
                }
                actions
            })
            .collect();
        for actions in &mut per_role {
            actions.sort();
        }

        let mut joint_moves: Vec<JointMove> = vec![Vec::new()];
        for actions in &per_role {
            let mut next = Vec::with_capacity(joint_moves.len() * actions.len());
            for partial in &joint_moves {
                for action in actions {
                    let mut jm = partial.clone();
                    jm.push(action.clone());
                    next.push(jm);
                }
            }
            joint_moves = next;
        }
        Ok(joint_moves)
    }

    /// The canonicalized set of ground `p` such that `next(p)` holds under
    /// `(state, move)`.
    pub fn next(&self, state: &State, mv: &JointMove) -> Result<State, ReasonerError> {
        let mut ctx = self.context(state, Some(mv));
        let nexts = ctx
            .derive("next")?
            .into_iter()
            .map(|t| t.args()[0].clone())
            .collect();
        Ok(State::canonicalize(nexts))
    }

    /// The goal value for `role` under `state`. If several `goal(role, v)`
    /// facts hold (ill-specified rules), the recovery policy is
    /// 100-biased: pick the max if 100 is among the candidates, otherwise
    /// the min.
    pub fn goal(&self, state: &State, role: &Term) -> Result<u8, ReasonerError> {
        let mut ctx = self.context(state, None);
        let mut values: Vec<u8> = ctx
            .derive("goal")?
            .into_iter()
            .filter(|t| &t.args()[0] == role)
            .filter_map(|t| goal_value(&t.args()[1]))
            .collect();
        values.sort_unstable();
        Ok(match values.as_slice() {
            [] => 0,
            vs if vs.contains(&100) => 100,
            vs => vs[0],
        })
    }

    /// True iff some ground `terminal` fact holds under `state`.
    pub fn terminal(&self, state: &State) -> Result<bool, ReasonerError> {
        let mut ctx = self.context(state, None);
        Ok(!ctx.derive("terminal")?.is_empty())
    }
}

fn goal_value(t: &Term) -> Option<u8> {
    match t {
        Term::Atom(a) => a.parse::<u16>().ok().map(|v| v.min(100) as u8),
        _ => None,
    }
}
