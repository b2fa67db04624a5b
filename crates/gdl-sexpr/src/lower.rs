use crate::{print, SExpr, SexprError};
use gdl_core::{Clause, Lit, Term};

/// Lowers one clause-shaped expression into `gdl-core`'s typed model:
/// `(<= head b1 .. bn)` is a rule, any other list is a fact.
pub fn to_clause(expr: &SExpr) -> Result<Clause, SexprError> {
    let items = expr
        .as_list()
        .ok_or_else(|| SexprError::Malformed("clause must be a list".into()))?;
    let Some(first) = items.first() else {
        return Err(SexprError::Malformed("empty clause".into()));
    };
    if first.as_atom().is_some_and(|a| a.eq_ignore_ascii_case("<=")) {
        let head = items
            .get(1)
            .ok_or_else(|| SexprError::Malformed("rule with no head".into()))?;
        let body = items[2..]
            .iter()
            .map(to_lit)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Clause::rule(to_term(head)?, body))
    } else {
        Ok(Clause::fact(to_term(expr)?))
    }
}

pub fn to_clauses(exprs: &[SExpr]) -> Result<Vec<Clause>, SexprError> {
    exprs.iter().map(to_clause).collect()
}

/// Parses then lowers a flat clause sequence in one step.
pub fn parse_rules(input: &str) -> Result<Vec<Clause>, SexprError> {
    to_clauses(&crate::sexpr::parse_many(input)?)
}

fn to_lit(expr: &SExpr) -> Result<Lit, SexprError> {
    if let Some(items) = expr.as_list() {
        match items.first().and_then(SExpr::as_atom) {
            Some(verb) if verb.eq_ignore_ascii_case("not") => {
                let inner = items
                    .get(1)
                    .ok_or_else(|| SexprError::Malformed("not with no argument".into()))?;
                return Ok(Lit::Neg(to_term(inner)?));
            }
            Some(verb) if verb.eq_ignore_ascii_case("distinct") => {
                let a = items
                    .get(1)
                    .ok_or_else(|| SexprError::Malformed("distinct missing first arg".into()))?;
                let b = items
                    .get(2)
                    .ok_or_else(|| SexprError::Malformed("distinct missing second arg".into()))?;
                return Ok(Lit::Distinct(to_term(a)?, to_term(b)?));
            }
            Some(verb) if verb.eq_ignore_ascii_case("or") => {
                let lits = items[1..]
                    .iter()
                    .map(to_lit)
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(Lit::Or(lits));
            }
            _ => {}
        }
    }
    Ok(Lit::Pos(to_term(expr)?))
}

/// Lowers a bare term: `?`-prefixed atoms become title-cased variables,
/// everything else is lowercased.
pub fn to_term(expr: &SExpr) -> Result<Term, SexprError> {
    match expr {
        SExpr::Atom(s) => {
            if let Some(name) = s.strip_prefix('?') {
                Ok(Term::var(title_case(name)))
            } else {
                Ok(Term::atom(s.to_lowercase()))
            }
        }
        SExpr::List(items) => {
            let (head, args) = items
                .split_first()
                .ok_or_else(|| SexprError::Malformed("empty term".into()))?;
            let functor = head
                .as_atom()
                .ok_or_else(|| SexprError::Malformed("term functor must be an atom".into()))?;
            let args = args.iter().map(to_term).collect::<Result<Vec<_>, _>>()?;
            Ok(Term::compound(functor.to_lowercase(), args))
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Inverse of [`to_term`]/[`to_clause`], restoring the `?`-prefix on
/// variables for re-serialization.
pub fn from_term(term: &Term) -> SExpr {
    match term {
        Term::Var(v) => SExpr::Atom(format!("?{}", v.to_lowercase())),
        Term::Atom(a) => SExpr::Atom(a.to_string()),
        Term::Compound(head, args) => {
            let mut items = vec![SExpr::Atom(head.to_string())];
            items.extend(args.iter().map(from_term));
            SExpr::List(items)
        }
    }
}

pub fn from_lit(lit: &Lit) -> SExpr {
    match lit {
        Lit::Pos(t) => from_term(t),
        Lit::Neg(t) => SExpr::List(vec![SExpr::Atom("not".into()), from_term(t)]),
        Lit::Distinct(a, b) => SExpr::List(vec![
            SExpr::Atom("distinct".into()),
            from_term(a),
            from_term(b),
        ]),
        Lit::Or(lits) => {
            let mut items = vec![SExpr::Atom("or".into())];
            items.extend(lits.iter().map(from_lit));
            SExpr::List(items)
        }
    }
}

pub fn from_clause(clause: &Clause) -> SExpr {
    if clause.is_fact() {
        from_term(&clause.head)
    } else {
        let mut items = vec![SExpr::Atom("<=".into()), from_term(&clause.head)];
        items.extend(clause.body.iter().map(from_lit));
        SExpr::List(items)
    }
}

/// Pretty-prints a full rule list, one clause per line.
pub fn print_rules(clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(|c| print(&from_clause(c)))
        .collect::<Vec<_>>()
        .join("\n")
}
