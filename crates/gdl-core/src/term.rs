use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Interned-ish symbol. `Arc<str>` keeps cloning cheap across the many
/// substitutions grounding performs without requiring a global interner.
pub type Symbol = Arc<str>;

pub fn symbol(s: impl AsRef<str>) -> Symbol {
    Arc::from(s.as_ref())
}

/// A ground or variable-bearing symbolic term.
///
/// Atoms and compounds are ordinary terms (`mark`, `cell(1,2,x)`); a
/// [`Term::Var`] is a symbol whose surface form began with `?` (by GDL
/// convention, title-cased once parsed — see `gdl-sexpr`).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Term {
    Var(Symbol),
    Atom(Symbol),
    Compound(Symbol, Vec<Term>),
}

impl Term {
    pub fn atom(s: impl AsRef<str>) -> Self {
        Term::Atom(symbol(s))
    }
    pub fn var(s: impl AsRef<str>) -> Self {
        Term::Var(symbol(s))
    }
    pub fn compound(head: impl AsRef<str>, args: Vec<Term>) -> Self {
        if args.is_empty() {
            Term::Atom(symbol(head))
        } else {
            Term::Compound(symbol(head), args)
        }
    }

    /// The principal functor symbol: the atom itself, or a compound's head.
    /// Variables have no functor.
    pub fn functor(&self) -> Option<&Symbol> {
        match self {
            Term::Atom(s) | Term::Compound(s, _) => Some(s),
            Term::Var(_) => None,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound(_, args) => args,
            _ => &[],
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// True iff this term contains no variable, recursively.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Atom(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Collects every distinct variable appearing in this term, in
    /// first-occurrence order.
    pub fn vars(&self) -> Vec<Symbol> {
        let mut found = Vec::new();
        self.collect_vars(&mut found);
        found
    }

    fn collect_vars(&self, out: &mut Vec<Symbol>) {
        match self {
            Term::Var(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Term::Atom(_) => {}
            Term::Compound(_, args) => {
                for a in args {
                    a.collect_vars(out);
                }
            }
        }
    }

    /// Applies a variable substitution structurally, leaving unbound
    /// variables untouched.
    pub fn subst(&self, bindings: &std::collections::HashMap<Symbol, Term>) -> Term {
        match self {
            Term::Var(v) => bindings.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Atom(_) => self.clone(),
            Term::Compound(head, args) => {
                Term::Compound(head.clone(), args.iter().map(|a| a.subst(bindings)).collect())
            }
        }
    }
}

/// Total order used to canonicalize states (sorted, deduplicated ground
/// term sequences): variables before atoms before compounds, then
/// lexicographic within each kind.
impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(t: &Term) -> u8 {
            match t {
                Term::Var(_) => 0,
                Term::Atom(_) => 1,
                Term::Compound(_, _) => 2,
            }
        }
        match (self, other) {
            (Term::Var(a), Term::Var(b)) => a.cmp(b),
            (Term::Atom(a), Term::Atom(b)) => a.cmp(b),
            (Term::Compound(ha, aa), Term::Compound(hb, ab)) => {
                ha.cmp(hb).then_with(|| aa.cmp(ab))
            }
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "?{}", v),
            Term::Atom(a) => write!(f, "{}", a),
            Term::Compound(head, args) => {
                write!(f, "(")?;
                write!(f, "{}", head)?;
                for a in args {
                    write!(f, " {}", a)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_detects_variables() {
        let ground = Term::compound("cell", vec![Term::atom("1"), Term::atom("2")]);
        let open = Term::compound("cell", vec![Term::var("X"), Term::atom("2")]);
        assert!(ground.is_ground());
        assert!(!open.is_ground());
    }

    #[test]
    fn vars_collects_unique_in_order() {
        let t = Term::compound(
            "row",
            vec![Term::var("X"), Term::var("Y"), Term::var("X")],
        );
        let vars: Vec<String> = t.vars().iter().map(|s| s.to_string()).collect();
        assert_eq!(vars, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn subst_replaces_bound_variables_only() {
        let t = Term::compound("cell", vec![Term::var("X"), Term::var("Y")]);
        let mut bindings = std::collections::HashMap::new();
        bindings.insert(symbol("X"), Term::atom("1"));
        let substituted = t.subst(&bindings);
        assert_eq!(
            substituted,
            Term::compound("cell", vec![Term::atom("1"), Term::var("Y")])
        );
    }

    #[test]
    fn sorting_is_total_and_canonical() {
        let mut terms = vec![Term::atom("b"), Term::atom("a"), Term::var("Z")];
        terms.sort();
        terms.dedup();
        assert_eq!(terms, {
            let mut expected = vec![Term::var("Z"), Term::atom("a"), Term::atom("b")];
            expected.sort();
            expected
        });
    }
}
