use gdl_core::Symbol;

/// Failures internal to grounding and satisfaction checking. Recovery from
/// these lives one layer up, in `gdl-search` and `gdl-session`.
#[derive(Debug, Clone)]
pub enum ReasonerError {
    /// A relation was asked to derive itself while already being derived —
    /// GDL forbids recursion that would loop; this is the depth-limited
    /// evaluator's circuit breaker.
    Cyclic(Symbol),
    /// The rule database has a dependency cycle through negation, so
    /// bottom-up evaluation has no stable fixpoint (caught once at START).
    Unstratified(Symbol),
}

impl std::fmt::Display for ReasonerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonerError::Cyclic(s) => write!(f, "cyclic derivation of relation `{}`", s),
            ReasonerError::Unstratified(s) => {
                write!(f, "recursion through negation involving relation `{}`", s)
            }
        }
    }
}

impl std::error::Error for ReasonerError {}
