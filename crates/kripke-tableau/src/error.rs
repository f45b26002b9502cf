use kripke_model::ModelError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableauError {
    /// The proof tree outgrew the configured ceiling. Nothing is known about
    /// the seed; this is not the same as "no model".
    #[error("tableau search aborted after {nodes} nodes (limit {limit})")]
    SearchAborted { nodes: usize, limit: usize },
    /// A branch already holds the largest world label, so no fresh world
    /// can be introduced.
    #[error("tableau ran out of world labels")]
    WorldLabelsExhausted,
    #[error("failed to build model from open branch: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TableauError>;
