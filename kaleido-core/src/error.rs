use thiserror::Error;

/// Recoverable, user-facing parse diagnostics.
///
/// These are reported to the user prefixed with `Error: ` and never
/// abort the top-level loop; the driver resynchronizes and continues
/// with the remaining tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected ')'")]
    ExpectedCloseParen,
    #[error("unknown token when expecting an expression")]
    UnknownToken,
    #[error("expected ')' or ',' in argument list")]
    MalformedArgumentList,
    #[error("expected function name in prototype")]
    ExpectedPrototypeName,
    #[error("expected '(' in prototype")]
    ExpectedPrototypeOpenParen,
    #[error("expected ')' in prototype")]
    ExpectedPrototypeCloseParen,
}

/// Errors raised by a backend consuming parsed items.
///
/// These indicate a bug in the front end or its caller rather than bad
/// user input, so they are a separate taxonomy from [`ParseError`].
/// The embedding application decides whether to abort or report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("unknown variable name '{0}'")]
    UnknownVariable(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported binary operator '{0}'")]
    UnsupportedOperator(char),
}
