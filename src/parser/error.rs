/// Errors that can occur during strict measurement parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A line did not resolve to exactly two numeric values
    #[error("line {line}: expected a frequency/amplitude pair, found \"{text}\"")]
    InvalidLine {
        /// 1-based line number within the trimmed input
        line: usize,
        /// The offending line, trimmed
        text: String,
    },
}

impl ParseError {
    /// 1-based line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidLine { line, .. } => *line,
        }
    }
}
