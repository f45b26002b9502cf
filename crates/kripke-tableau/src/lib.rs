//! Semantic tableau decision procedure for the basic modal logic K.
//!
//! A [`Tableau`] grows a proof tree from a seed formula at world 0. Branches
//! that record an atom and its negation at the same world close; a branch on
//! which no rule applies any more stays open and describes a model of the
//! seed, which [`Tableau::construct_model`] turns into a [`PointedModel`].
//!
//! [`PointedModel`]: kripke_model::PointedModel

mod arena;
pub mod config;
pub mod engine;
pub mod error;
mod rules;
pub mod tree;

pub use config::TableauConfig;
pub use engine::{Tableau, find_countermodel, find_model};
pub use error::TableauError;
pub use tree::{Literal, NodeId, OpenBranch, TableauNode};
