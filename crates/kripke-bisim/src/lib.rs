//! Bisimulation by Kanellakis–Smolka partition refinement.
//!
//! [`coarsest_partition`] groups the worlds of a model into blocks of
//! bisimilar worlds, [`reduce_model`] collapses each block into one world and
//! [`construct_bisimulation`] relates the worlds of two models.

pub mod bisimulation;
pub mod config;
pub mod partition;
pub mod reduce;
pub mod system;

pub use bisimulation::{Bisimulation, are_bisimilar, construct_bisimulation};
pub use config::RefinementConfig;
pub use partition::{Partition, Refinement};
pub use reduce::{coarsest_partition, reduce_model, reduce_model_with};
pub use system::TransitionSystem;
