//! START/PLAY/STOP/ABORT match lifecycle, threaded over `gdl-reasoner` and
//! `gdl-search`.
//!
//! - [`Session`] — the per-match state machine
//! - [`Registry`] — matchId → session map, replacing a single process-wide
//!   "current game" slot
//! - [`GdlError`] — the error taxonomy shared across this match lifecycle
mod error;
mod registry;
mod session;

pub use error::GdlError;
pub use registry::{MatchId, Registry};
pub use session::{MatchContext, Session};
