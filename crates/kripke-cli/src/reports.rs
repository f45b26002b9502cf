//! Command results, printable as tables or serialized as JSON.

use anyhow::{Context, Result};
use kripke_bisim::{RefinementConfig, coarsest_partition, construct_bisimulation, reduce_model};
use kripke_formula::Formula;
use kripke_model::{ModelError, PointedModel, WorldId};
use kripke_tableau::{Tableau, TableauConfig};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub formula: String,
    pub latex: String,
    /// `None` when the grammar cannot express the formula.
    pub grammar: Option<String>,
    pub atoms: Vec<String>,
    pub modal_depth: usize,
    pub size: usize,
}

impl ParseReport {
    pub fn new(formula: &Formula) -> Self {
        Self {
            formula: formula.serialize(),
            latex: formula.to_latex(),
            grammar: formula.to_grammar(),
            atoms: formula.atoms().into_iter().map(String::from).collect(),
            modal_depth: formula.modal_depth(),
            size: formula.size(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub formula: String,
    pub world: String,
    pub holds: bool,
    /// Names of all worlds where the formula holds.
    pub extension: Vec<String>,
}

impl EvalReport {
    pub fn evaluate(formula: &Formula, model: &PointedModel) -> Result<Self, ModelError> {
        let selected = model.selected_world().ok_or(ModelError::NoSelectedWorld)?;
        let holds = formula.is_satisfied(selected, model)?;
        let extension = formula
            .extension(model)?
            .into_iter()
            .map(|world| world_name(model, world))
            .collect();
        Ok(Self {
            formula: formula.serialize(),
            world: world_name(model, selected),
            holds,
            extension,
        })
    }
}

/// What a tableau search is asked to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Seed with the negation; an open branch is a countermodel.
    Validity,
    /// Seed with the formula; an open branch is a model.
    Satisfiability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
    Satisfiable,
    Unsatisfiable,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub config: TableauConfig,
    /// Minimise the witness model by bisimulation.
    pub reduce: bool,
    /// Include the rendered proof tree.
    pub tree: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub formula: String,
    pub mode: SearchMode,
    pub verdict: Verdict,
    pub nodes: usize,
    pub open_branches: usize,
    pub closed_branches: usize,
    /// The model (or countermodel) built from the first open branch.
    pub model: Option<ModelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

impl SearchReport {
    pub fn run(formula: &Formula, mode: SearchMode, options: &SearchOptions) -> Result<Self> {
        let tableau = match mode {
            SearchMode::Validity => Tableau::for_validity(formula, &options.config),
            SearchMode::Satisfiability => Tableau::build(formula, &options.config),
        }
        .with_context(|| format!("tableau search for {formula}"))?;

        let mut model = tableau
            .construct_model()
            .context("build model from open branch")?;
        if options.reduce
            && let Some(found) = &model
        {
            let reduced = reduce_model(found).context("reduce model")?;
            info!(
                worlds = found.world_count(),
                reduced = reduced.world_count(),
                "witness minimised"
            );
            model = Some(reduced);
        }

        let verdict = match (mode, tableau.has_model()) {
            (SearchMode::Validity, false) => Verdict::Valid,
            (SearchMode::Validity, true) => Verdict::Invalid,
            (SearchMode::Satisfiability, true) => Verdict::Satisfiable,
            (SearchMode::Satisfiability, false) => Verdict::Unsatisfiable,
        };

        Ok(Self {
            formula: formula.serialize(),
            mode,
            verdict,
            nodes: tableau.node_count(),
            open_branches: tableau.open_branches().len(),
            closed_branches: tableau.closed_branches(),
            model: model.as_ref().map(ModelReport::from_model),
            tree: options.tree.then(|| tableau.render_tree()),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldReport {
    pub id: WorldId,
    pub name: String,
    pub atoms: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeReport {
    pub relation: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub worlds: Vec<WorldReport>,
    pub edges: Vec<EdgeReport>,
}

impl ModelReport {
    pub fn from_model(model: &PointedModel) -> Self {
        let selected = model.selected_world();
        let worlds = model
            .worlds()
            .map(|world| WorldReport {
                id: world.id(),
                name: world.name().to_string(),
                atoms: world.atoms().iter().cloned().collect(),
                selected: selected == Some(world.id()),
            })
            .collect();
        let edges = model
            .edges()
            .into_iter()
            .map(|edge| EdgeReport {
                relation: model
                    .relation(edge.relation)
                    .map_or_else(|_| edge.relation.to_string(), |r| r.name().to_string()),
                from: world_name(model, edge.from),
                to: world_name(model, edge.to),
            })
            .collect();
        Self { worlds, edges }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReduceReport {
    /// World names of the original model, one list per quotient world.
    pub blocks: Vec<Vec<String>>,
    pub block_counts: Vec<usize>,
    pub model: ModelReport,
}

impl ReduceReport {
    pub fn run(model: &PointedModel) -> Result<Self, ModelError> {
        let refinement = coarsest_partition(model, &RefinementConfig::default())?;
        let reduced = reduce_model(model)?;
        let blocks = refinement
            .partition
            .blocks()
            .iter()
            .map(|block| block.iter().map(|&world| world_name(model, world)).collect())
            .collect();
        Ok(Self {
            blocks,
            block_counts: refinement.block_counts,
            model: ModelReport::from_model(&reduced),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BisimReport {
    /// Related `(left, right)` world names.
    pub pairs: Vec<(String, String)>,
    pub selected_bisimilar: bool,
}

impl BisimReport {
    pub fn run(left: &PointedModel, right: &PointedModel) -> Result<Self, ModelError> {
        let bisimulation = construct_bisimulation(left, right, &RefinementConfig::default())?;
        let selected_bisimilar = bisimulation.relates_selected(left, right)?;
        let pairs = bisimulation
            .pairs
            .iter()
            .map(|&(l, r)| (world_name(left, l), world_name(right, r)))
            .collect();
        Ok(Self {
            pairs,
            selected_bisimilar,
        })
    }
}

fn world_name(model: &PointedModel, id: WorldId) -> String {
    model
        .world(id)
        .map_or_else(|| id.to_string(), |world| world.name().to_string())
}
