use crate::unify::unify;
use crate::ReasonerError;
use gdl_core::{Clause, JointMove, Lit, RuleDatabase, State, Symbol, Term};
use std::collections::{HashMap, HashSet};

/// A state-dependent bottom-up query context: one `Context` answers every
/// relation query for a single fixed `(state, joint move)` pair, memoizing
/// each relation's full set of ground instances as it's derived. Build a
/// fresh one per `legal`/`next`/`goal`/`terminal` call.
pub struct Context<'a> {
    db: &'a RuleDatabase,
    state: &'a State,
    /// `does(r,a)` atoms reconstructed from the joint move, role-ordered.
    does_atoms: Vec<Term>,
    cache: HashMap<Symbol, Vec<Term>>,
    in_progress: HashSet<Symbol>,
}

impl<'a> Context<'a> {
    pub fn new(db: &'a RuleDatabase, state: &'a State, roles: &[Term], mv: Option<&JointMove>) -> Self {
        let does_atoms = match mv {
            Some(mv) => roles
                .iter()
                .zip(mv.iter())
                .map(|(r, a)| Term::compound("does", vec![r.clone(), a.clone()]))
                .collect(),
            None => Vec::new(),
        };
        Context {
            db,
            state,
            does_atoms,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// All ground atoms of relation `symbol` that hold under this
    /// context's `(state, move)`, derived from facts and rules alike.
    pub fn derive(&mut self, symbol: &str) -> Result<Vec<Term>, ReasonerError> {
        if let Some(hit) = self.cache.get(symbol) {
            return Ok(hit.clone());
        }
        if self.in_progress.contains(symbol) {
            return Err(ReasonerError::Cyclic(gdl_core::symbol(symbol)));
        }
        self.in_progress.insert(gdl_core::symbol(symbol));

        let mut results = Vec::new();
        let clauses: Vec<Clause> = self.db.clauses_of(symbol).to_vec();
        for clause in &clauses {
            if clause.is_fact() {
                if clause.head.is_ground() {
                    results.push(clause.head.clone());
                }
                continue;
            }
            results.extend(self.ground_rule(clause)?);
        }
        results.sort();
        results.dedup();

        self.in_progress.remove(symbol);
        self.cache.insert(gdl_core::symbol(symbol), results.clone());
        Ok(results)
    }

    /// Expands one rule against the current state/move: computes
    /// per-variable candidate domains from its body literals, takes the
    /// Cartesian product of those domains, then keeps the instances whose
    /// fully-substituted body actually holds.
    fn ground_rule(&mut self, clause: &Clause) -> Result<Vec<Term>, ReasonerError> {
        let vars = clause_vars(clause);
        let mut domains: HashMap<Symbol, Vec<Term>> = HashMap::new();
        for lit in &clause.body {
            if let Lit::Pos(t) = lit {
                self.collect_domain(t, &mut domains)?;
            }
        }

        let mut assignments: Vec<HashMap<Symbol, Term>> = vec![HashMap::new()];
        for v in &vars {
            let domain = match domains.get(v) {
                Some(d) if !d.is_empty() => d.clone(),
                _ => {
                    // This variable never appears in a positive body
                    // literal we can source candidates from — nothing to
                    // ground it with, so this clause yields no instances.
                    return Ok(Vec::new());
                }
            };
            let mut next = Vec::with_capacity(assignments.len() * domain.len());
            for partial in &assignments {
                for val in &domain {
                    let mut b = partial.clone();
                    b.insert(v.clone(), val.clone());
                    next.push(b);
                }
            }
            assignments = next;
        }

        let mut results = Vec::new();
        for binding in assignments {
            let head = clause.head.subst(&binding);
            if !head.is_ground() {
                continue;
            }
            let body: Vec<Lit> = clause.body.iter().map(|l| l.subst(&binding)).collect();
            let mut ok = true;
            for lit in &body {
                if !self.holds_lit(lit)? {
                    ok = false;
                    break;
                }
            }
            if ok {
                results.push(head);
            }
        }
        Ok(results)
    }

    /// Adds the domain candidates contributed by one positive body literal
    /// to `domains`, unifying the literal's pattern against the relevant
    /// source (state for `true`, move for `does`, derived facts otherwise).
    fn collect_domain(
        &mut self,
        t: &Term,
        domains: &mut HashMap<Symbol, Vec<Term>>,
    ) -> Result<(), ReasonerError> {
        let (pattern, source): (Term, Vec<Term>) = match t.functor().map(|s| s.as_ref()) {
            Some("true") => (t.args()[0].clone(), self.state.iter().cloned().collect()),
            Some("does") => (t.clone(), self.does_atoms.clone()),
            Some(sym) => (t.clone(), self.derive(sym)?),
            None => return Ok(()),
        };
        for candidate in &source {
            let mut bindings = HashMap::new();
            if unify(&pattern, candidate, &mut bindings) {
                for (var, val) in bindings {
                    let entry = domains.entry(var).or_default();
                    if !entry.contains(&val) {
                        entry.push(val);
                    }
                }
            }
        }
        Ok(())
    }

    /// Satisfaction of a single, fully-ground body literal.
    fn holds_lit(&mut self, lit: &Lit) -> Result<bool, ReasonerError> {
        Ok(match lit {
            Lit::Pos(t) => self.holds_pos(t)?,
            Lit::Neg(t) => !self.holds_pos(t)?,
            Lit::Distinct(a, b) => a != b,
            Lit::Or(lits) => {
                let mut any = false;
                for l in lits {
                    if self.holds_lit(l)? {
                        any = true;
                        break;
                    }
                }
                any
            }
        })
    }

    fn holds_pos(&mut self, t: &Term) -> Result<bool, ReasonerError> {
        Ok(match t.functor().map(|s| s.as_ref()) {
            Some("true") => self.state.contains(&t.args()[0]),
            Some("does") => self.does_atoms.contains(t),
            Some(sym) => self.derive(sym)?.contains(t),
            None => false,
        })
    }
}

/// Every distinct variable in a clause's head and body, head-first so that
/// the Cartesian product below fills in the most externally-visible
/// variables first (cosmetic — order doesn't affect the result set).
fn clause_vars(clause: &Clause) -> Vec<Symbol> {
    let mut vars = clause.head.vars();
    for lit in &clause.body {
        for v in lit.vars() {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
    }
    vars
}
