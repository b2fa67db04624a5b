use crate::SexprError;
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::delimited,
    IResult,
};

/// The untyped parse tree: an atom (any run of non-whitespace,
/// non-paren characters) or a parenthesized list of sub-expressions.
/// GDL's `?`-prefixed-variable and rule-head conventions are resolved one
/// layer up, in [`crate::lower`] — this layer only knows syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(s) => Some(s),
            SExpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items),
            SExpr::Atom(_) => None,
        }
    }
}

/// Parses exactly one top-level expression, ignoring surrounding
/// whitespace. Used for single wire messages (`(START ...)`, `(PLAY ...)`).
pub fn parse_one(input: &str) -> Result<SExpr, SexprError> {
    match delimited(multispace0, sexpr, multispace0)(input) {
        Ok((rest, expr)) if rest.trim().is_empty() => Ok(expr),
        Ok((rest, _)) => Err(SexprError::Malformed(format!("trailing input: {:?}", rest))),
        Err(e) => Err(SexprError::Malformed(format!("{:?}", e))),
    }
}

/// Parses a flat top-level sequence of expressions — the rule-list shape a
/// GDL ruleset arrives as.
pub fn parse_many(input: &str) -> Result<Vec<SExpr>, SexprError> {
    match delimited(multispace0, many0(delimited(multispace0, sexpr, multispace0)), multispace0)(input) {
        Ok((rest, exprs)) if rest.trim().is_empty() => Ok(exprs),
        Ok((rest, _)) => Err(SexprError::Malformed(format!("trailing input: {:?}", rest))),
        Err(e) => Err(SexprError::Malformed(format!("{:?}", e))),
    }
}

fn sexpr(i: &str) -> IResult<&str, SExpr> {
    alt((list, atom))(i)
}

fn list(i: &str) -> IResult<&str, SExpr> {
    map(
        delimited(
            char('('),
            many0(delimited(multispace0, sexpr, multispace0)),
            char(')'),
        ),
        SExpr::List,
    )(i)
}

fn atom(i: &str) -> IResult<&str, SExpr> {
    map(atom_text, |s: &str| SExpr::Atom(s.to_string()))(i)
}

fn atom_text(i: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n()")(i)
}

/// Inverse of the parser: a fully-parenthesized rendering with single
/// spaces between siblings, used for the round-trip test and for
/// re-serializing outbound messages.
pub fn print(expr: &SExpr) -> String {
    match expr {
        SExpr::Atom(s) => s.clone(),
        SExpr::List(items) => {
            let inner: Vec<String> = items.iter().map(print).collect();
            format!("({})", inner.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_lists() {
        let parsed = parse_one("(does robot (move a b))").unwrap();
        assert_eq!(
            parsed,
            SExpr::List(vec![
                SExpr::Atom("does".into()),
                SExpr::Atom("robot".into()),
                SExpr::List(vec![
                    SExpr::Atom("move".into()),
                    SExpr::Atom("a".into()),
                    SExpr::Atom("b".into()),
                ]),
            ])
        );
    }

    #[test]
    fn parses_bare_atom() {
        assert_eq!(parse_one("terminal").unwrap(), SExpr::Atom("terminal".into()));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_one("(role robot) extra").is_err());
    }

    #[test]
    fn print_is_inverse_of_parse() {
        let src = "(<= (legal ?r a) (true (on p)) (role ?r))";
        let parsed = parse_one(src).unwrap();
        assert_eq!(parse_one(&print(&parsed)).unwrap(), parsed);
    }

    #[test]
    fn parse_many_splits_flat_clause_sequence() {
        let exprs = parse_many("(role robot) (init (off p)) (legal robot a)").unwrap();
        assert_eq!(exprs.len(), 3);
    }
}
