//! State-dependent bottom-up evaluator for the fixed GDL relations and the
//! six GGP game primitives layered over it.
//!
//! ## Modules
//!
//! - [`unify`] — one-directional pattern/value unification
//! - [`context`] — per-query grounding + satisfaction engine ([`Context`])
//! - [`game`] — [`Game`] descriptor and `roles/init/legal/next/goal/terminal`
//! - [`error`] — [`ReasonerError`]
//! - [`stratify`] — START-time negation-recursion check
mod context;
mod error;
mod game;
mod stratify;
mod unify;

pub use context::*;
pub use error::*;
pub use game::*;
pub use stratify::check_stratified;
