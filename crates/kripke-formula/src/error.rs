use thiserror::Error;

/// Rejection of formula text. No partial formula is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("empty formula")]
    Empty,
    #[error("atomic formula '{atom}' contains a reserved symbol: '{token}'")]
    ReservedToken { atom: String, token: &'static str },
    #[error("no top-level binary operator found in '{input}'")]
    NoTopLevelOperator { input: String },
    #[error("unbalanced brackets in '{input}'")]
    UnbalancedBrackets { input: String },
}
