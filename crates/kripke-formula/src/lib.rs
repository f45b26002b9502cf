//! The modal formula language.
//!
//! Text in the bracketed keyword grammar is turned into a [`Formula`] by
//! [`parse`]. A formula can be evaluated at a world of a
//! [`kripke_model::PointedModel`] and rendered in several display forms.

mod display;
pub mod error;
mod evaluate;
pub mod formula;
pub mod parser;

pub use error::SyntaxError;
pub use formula::Formula;
pub use parser::parse;
