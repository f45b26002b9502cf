//! Library side of the `kripke` command: logging setup, model arguments and
//! the reports each command prints.

pub mod logging;
pub mod model_args;
pub mod reports;
