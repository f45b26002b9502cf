use kripke_model::RelationId;

/// Settings for one refinement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefinementConfig {
    /// The relation whose edges the refinement follows. Other relations of
    /// the model are ignored.
    pub relation: RelationId,
}

impl RefinementConfig {
    #[must_use]
    pub fn with_relation(mut self, relation: RelationId) -> Self {
        self.relation = relation;
        self
    }
}
