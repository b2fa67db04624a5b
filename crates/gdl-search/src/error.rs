use gdl_reasoner::ReasonerError;

/// Failures that can surface while growing or querying the search tree.
#[derive(Debug, Clone)]
pub enum SearchError {
    /// A relation failed to ground or evaluate.
    Reasoner(ReasonerError),
    /// `findmoves` returned no joint moves at all — an ill-formed game,
    /// since every role is always given at least the `noop` filler.
    NoLegalMoves,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Reasoner(e) => write!(f, "{}", e),
            SearchError::NoLegalMoves => write!(f, "no legal joint moves available"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ReasonerError> for SearchError {
    fn from(e: ReasonerError) -> Self {
        SearchError::Reasoner(e)
    }
}
