use thiserror::Error;

/// Structural problems found while scanning a config file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unterminated string starting on line {line}")]
    UnterminatedString { line: usize },

    #[error("Closing brace without matching opening brace on line {line}")]
    UnmatchedClosingBrace { line: usize },

    #[error("Opening brace on line {line} is never closed")]
    UnbalancedBraces { line: usize },
}
