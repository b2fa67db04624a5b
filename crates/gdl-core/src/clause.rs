use crate::Term;

/// A single body literal.
///
/// `Pos` covers both relational literals (`true(p)`, `does(r,a)`, and
/// user-defined relations) — the distinction between them is made by the
/// evaluator (`gdl-reasoner`) based on the functor symbol, not encoded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lit {
    Pos(Term),
    Neg(Term),
    Distinct(Term, Term),
    Or(Vec<Lit>),
}

impl Lit {
    /// Every variable mentioned by this literal, in first-occurrence order.
    pub fn vars(&self) -> Vec<crate::Symbol> {
        match self {
            Lit::Pos(t) | Lit::Neg(t) => t.vars(),
            Lit::Distinct(a, b) => {
                let mut vs = a.vars();
                for v in b.vars() {
                    if !vs.contains(&v) {
                        vs.push(v);
                    }
                }
                vs
            }
            Lit::Or(lits) => {
                let mut vs = Vec::new();
                for l in lits {
                    for v in l.vars() {
                        if !vs.contains(&v) {
                            vs.push(v);
                        }
                    }
                }
                vs
            }
        }
    }

    pub fn subst(&self, bindings: &std::collections::HashMap<crate::Symbol, Term>) -> Lit {
        match self {
            Lit::Pos(t) => Lit::Pos(t.subst(bindings)),
            Lit::Neg(t) => Lit::Neg(t.subst(bindings)),
            Lit::Distinct(a, b) => Lit::Distinct(a.subst(bindings), b.subst(bindings)),
            Lit::Or(lits) => Lit::Or(lits.iter().map(|l| l.subst(bindings)).collect()),
        }
    }
}

/// Either a fact (`head`) or a rule (`head :- body`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub head: Term,
    pub body: Vec<Lit>,
}

impl Clause {
    pub fn fact(head: Term) -> Self {
        Clause { head, body: Vec::new() }
    }

    pub fn rule(head: Term, body: Vec<Lit>) -> Self {
        Clause { head, body }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    /// The relation symbol this clause contributes to: the head's own
    /// symbol for an atom/compound head (facts and rules alike).
    pub fn head_symbol(&self) -> Option<&crate::Symbol> {
        self.head.functor()
    }
}
