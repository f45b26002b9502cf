//! Relational (Kripke) models.
//!
//! A [`PointedModel`] owns its [`World`]s and [`AccessibilityRelation`]s and
//! optionally designates one world as the point of evaluation. Every committed
//! mutation is published to the attached [`ModelObserver`]s.

pub mod error;
pub mod ids;
pub mod model;
pub mod observer;
pub mod relation;
pub mod world;

pub use error::{ModelError, Result};
pub use ids::{RelationId, RelationKey, WorldId};
pub use model::{Edge, PointedModel};
pub use observer::{ModelObserver, ObserverId};
pub use relation::AccessibilityRelation;
pub use world::World;
