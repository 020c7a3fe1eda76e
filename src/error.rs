// ABOUTME: Error types for the lexer, parser, and evaluator

use thiserror::Error;

/// A syntactic error produced by the lexer or parser, anchored to a source position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[{line}:{col}] {message}")]
pub struct ParserError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl ParserError {
    pub fn new(line: usize, col: usize, message: impl Into<String>) -> Self {
        ParserError {
            line,
            col,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("{function}: expected {expected} argument{}, got {actual}", if expected == "1" { "" } else { "s" })]
    ArityError {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("{function}: expected {expected}, got {actual}")]
    TypeError {
        function: String,
        expected: String,
        actual: String,
    },

    #[error("Encountered undefined atom {0}")]
    UndefinedAtom(String),

    #[error("{0}")]
    IllegalContext(String),

    #[error("Expected function")]
    NotCallable,

    #[error("Cannot evaluate the empty list")]
    EmptyApplication,

    #[error("I/O error: {0}")]
    Io(String),

    /// Raised by `exit`. Caught only by the driver; never visible to user code.
    #[error("interpreter exit requested")]
    Exit,

    /// A fatal internal invariant violation (e.g. an unmanaged handle surfaced during marking).
    #[error("implementation error: {0}")]
    ImplementationError(String),
}

impl EvalError {
    pub fn arity(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn type_error(function: &str, expected: &str, actual: &str) -> Self {
        EvalError::TypeError {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Top-level error uniting the parser and evaluator error kinds, as seen by the driver.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
