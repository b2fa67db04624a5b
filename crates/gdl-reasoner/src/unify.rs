use gdl_core::{Symbol, Term};
use std::collections::HashMap;

/// One-directional unification: `pattern` may contain variables, `value`
/// must already be ground (it comes from a known fact, the current state,
/// or the current joint move). Returns the bindings needed to turn
/// `pattern` into `value`, or `None` if they don't match.
pub fn unify(pattern: &Term, value: &Term, out: &mut HashMap<Symbol, Term>) -> bool {
    match pattern {
        Term::Var(v) => match out.get(v) {
            Some(bound) => bound == value,
            None => {
                out.insert(v.clone(), value.clone());
                true
            }
        },
        Term::Atom(a) => matches!(value, Term::Atom(b) if a == b),
        Term::Compound(head, args) => match value {
            Term::Compound(head2, args2) if head == head2 && args.len() == args2.len() => {
                args.iter().zip(args2).all(|(p, v)| unify(p, v, out))
            }
            _ => false,
        },
    }
}
