//! HTTP transport binding the GGP wire protocol to `gdl-session`'s match
//! state machine.
//!
//! - [`message`] — request parsing and response encoding over S-expressions
//! - [`server`] — the actix-web app: CORS, routing, and dispatch
pub mod message;
pub mod server;

pub use server::{run, PlayerConfig};
