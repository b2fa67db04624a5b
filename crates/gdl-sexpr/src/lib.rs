//! S-expression syntax and the lowering pass into `gdl-core`'s typed terms.
//!
//! - [`sexpr`] — the untyped parse tree, parser, and printer
//! - [`lower`] — `SExpr` ⇄ `gdl_core::{Term, Clause}` conversion
mod error;
mod lower;
mod sexpr;

pub use error::SexprError;
pub use lower::{from_clause, from_lit, from_term, parse_rules, print_rules, to_clause, to_clauses, to_term};
pub use sexpr::{parse_many, parse_one, print, SExpr};
