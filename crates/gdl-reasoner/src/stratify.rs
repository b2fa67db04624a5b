use gdl_core::{Lit, RuleDatabase, Symbol, Term};
use std::collections::HashMap;

use crate::ReasonerError;

/// Rejects a rule database containing recursion through negation: a cycle
/// of relation dependencies where at least one edge on the cycle is a
/// negative body literal. Bottom-up evaluation has no well-defined fixpoint
/// for such rules, so this must be caught once at START rather than
/// surfacing as a `Cyclic` error mid-match.
pub fn check_stratified(db: &RuleDatabase) -> Result<(), ReasonerError> {
    let mut deps: HashMap<Symbol, Vec<(Symbol, bool)>> = HashMap::new();
    for symbol in db.symbols() {
        let mut edges = Vec::new();
        for clause in db.clauses_of(symbol.as_ref()) {
            collect_deps(&clause.body, false, &mut edges);
        }
        deps.insert(symbol.clone(), edges);
    }

    let mut state: HashMap<Symbol, u8> = HashMap::new();
    for symbol in deps.keys() {
        if let Some(culprit) = visit(symbol, &deps, &mut state, false) {
            return Err(ReasonerError::Unstratified(culprit));
        }
    }
    Ok(())
}

/// 0 = unvisited, 1 = on the current path, 2 = fully explored.
fn visit(
    node: &Symbol,
    deps: &HashMap<Symbol, Vec<(Symbol, bool)>>,
    state: &mut HashMap<Symbol, u8>,
    through_negation: bool,
) -> Option<Symbol> {
    match state.get(node).copied().unwrap_or(0) {
        1 => return through_negation.then(|| node.clone()),
        2 => return None,
        _ => {}
    }
    state.insert(node.clone(), 1);
    if let Some(edges) = deps.get(node) {
        for (dep, negated) in edges {
            if let Some(culprit) = visit(dep, deps, state, through_negation || *negated) {
                return Some(culprit);
            }
        }
    }
    state.insert(node.clone(), 2);
    None
}

fn collect_deps(body: &[Lit], negated: bool, edges: &mut Vec<(Symbol, bool)>) {
    for lit in body {
        collect_lit(lit, negated, edges);
    }
}

fn collect_lit(lit: &Lit, negated: bool, edges: &mut Vec<(Symbol, bool)>) {
    match lit {
        Lit::Pos(t) => push_dep(t, negated, edges),
        Lit::Neg(t) => push_dep(t, true, edges),
        Lit::Distinct(_, _) => {}
        Lit::Or(lits) => {
            for l in lits {
                collect_lit(l, negated, edges);
            }
        }
    }
}

fn push_dep(t: &Term, negated: bool, edges: &mut Vec<(Symbol, bool)>) {
    if let Some(sym) = t.functor() {
        if sym.as_ref() != "true" && sym.as_ref() != "does" {
            edges.push((sym.clone(), negated));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_core::Clause;

    #[test]
    fn accepts_ordinary_negation() {
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::atom("on")),
            Clause::rule(Term::atom("off"), vec![Lit::Neg(Term::atom("on"))]),
        ]);
        assert!(check_stratified(&db).is_ok());
    }

    #[test]
    fn rejects_self_negation() {
        let db = RuleDatabase::build(vec![Clause::rule(
            Term::atom("p"),
            vec![Lit::Neg(Term::atom("p"))],
        )]);
        assert!(check_stratified(&db).is_err());
    }

    #[test]
    fn rejects_mutual_recursion_through_negation() {
        let db = RuleDatabase::build(vec![
            Clause::rule(Term::atom("a"), vec![Lit::Neg(Term::atom("b"))]),
            Clause::rule(Term::atom("b"), vec![Lit::Pos(Term::atom("a"))]),
        ]);
        assert!(check_stratified(&db).is_err());
    }

    #[test]
    fn accepts_positive_recursion() {
        // Ordinary positive recursion (e.g. transitive closure) is fine —
        // only cycles carrying a negative edge are rejected.
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::compound("edge", vec![Term::atom("a"), Term::atom("b")])),
            Clause::rule(
                Term::compound("path", vec![Term::var("X"), Term::var("Y")]),
                vec![Lit::Pos(Term::compound(
                    "edge",
                    vec![Term::var("X"), Term::var("Y")],
                ))],
            ),
            Clause::rule(
                Term::compound("path", vec![Term::var("X"), Term::var("Z")]),
                vec![
                    Lit::Pos(Term::compound("edge", vec![Term::var("X"), Term::var("Y")])),
                    Lit::Pos(Term::compound("path", vec![Term::var("Y"), Term::var("Z")])),
                ],
            ),
        ]);
        assert!(check_stratified(&db).is_ok());
    }
}
