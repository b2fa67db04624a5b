/// Failures while tokenizing, parsing, or lowering the wire format.
#[derive(Debug, Clone)]
pub enum SexprError {
    Malformed(String),
}

impl std::fmt::Display for SexprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SexprError::Malformed(s) => write!(f, "malformed s-expression: {}", s),
        }
    }
}

impl std::error::Error for SexprError {}
