use gdl_reasoner::ReasonerError;
use gdl_search::SearchError;

/// The error kinds a session can surface, hand-written the way
/// `rbp_gameroom::protocol::ProtocolError` is: a small enum plus manual
/// `Display`/`Error` impls, no derive macro.
#[derive(Debug, Clone)]
pub enum GdlError {
    /// A wire message didn't parse as a well-formed S-expression.
    ParseError(String),
    /// Grounding produced no candidates for a mandatory primitive on a
    /// non-terminal state — a bug in the supplied rules, not in the agent.
    RuleError(String),
    /// The search deadline was hit mid-computation. Not treated as a
    /// failure: callers fall back to the best move found so far.
    ClockExpired,
    /// A PLAY arrived with a joint move absent from the memoized edge set.
    StateUnknown(String),
    /// A message verb the session doesn't recognize.
    UnknownVerb(String),
    /// The rule database failed the START-time negation/recursion check,
    /// or a verb arrived in a state that doesn't accept it (e.g. PLAY
    /// before START).
    InvalidTransition(String),
}

impl std::fmt::Display for GdlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GdlError::ParseError(s) => write!(f, "parse error: {}", s),
            GdlError::RuleError(s) => write!(f, "rule error: {}", s),
            GdlError::ClockExpired => write!(f, "clock expired"),
            GdlError::StateUnknown(s) => write!(f, "state unknown: {}", s),
            GdlError::UnknownVerb(s) => write!(f, "unknown verb: {}", s),
            GdlError::InvalidTransition(s) => write!(f, "invalid transition: {}", s),
        }
    }
}

impl std::error::Error for GdlError {}

impl From<ReasonerError> for GdlError {
    fn from(e: ReasonerError) -> Self {
        GdlError::RuleError(e.to_string())
    }
}

impl From<SearchError> for GdlError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Reasoner(e) => GdlError::RuleError(e.to_string()),
            SearchError::NoLegalMoves => GdlError::RuleError(e.to_string()),
        }
    }
}
