/// Node ceiling applied when none is configured.
pub const DEFAULT_MAX_NODES: usize = 250_000;

/// Limits for one tableau search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableauConfig {
    /// Maximum number of proof-tree nodes; `None` grows without bound.
    pub max_nodes: Option<usize>,
}

impl Default for TableauConfig {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

impl TableauConfig {
    /// No ceiling. A pathological seed may exhaust memory.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_nodes: None }
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
