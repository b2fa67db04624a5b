//! Term model and rule database for Game Description Language rule sets.
//!
//! ## Types
//!
//! - [`Term`] — ground or variable-bearing symbolic term
//! - [`Clause`] — a fact or a rule over [`Lit`]erals
//! - [`RuleDatabase`] — clauses indexed by head relation symbol
mod clause;
mod database;
mod state;
mod term;

pub use clause::*;
pub use database::*;
pub use state::*;
pub use term::*;
