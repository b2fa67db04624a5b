use crate::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// The matchId a GGP server uses to address a running match.
pub type MatchId = String;

/// Replaces a single process-wide current-game slot with a map from matchId
/// to an independently-lockable `Session`, so concurrent matches
/// never block on each other — grounded on `rbp_hosting::Casino`'s
/// `RwLock<HashMap<...>>` of per-room handles.
#[derive(Default)]
pub struct Registry {
    sessions: RwLock<HashMap<MatchId, Arc<Mutex<Session>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the session for `id`, creating a fresh `Idle` one if this is
    /// the first message seen for this matchId. A START arriving for a
    /// matchId already in the registry simply re-drives that same session:
    /// `Session::start` has no guard on the current state and unconditionally
    /// overwrites it, so a mid-match START restarts that match from scratch
    /// rather than being rejected.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return session.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone()
    }

    /// Drops a match's session entirely (STOP/ABORT), freeing its tree.
    pub async fn remove(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
