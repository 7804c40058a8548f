//! HiGHS adapter for the lpbridge solver abstraction.
//!
//! Maps the uniform handle/solver interface onto the `highs` crate. The
//! handle accumulates the model and the identifier-to-column table; the
//! solver materializes a native HiGHS problem per solve, translates applied
//! parameters to HiGHS options, and maps HiGHS model statuses onto the
//! uniform status vocabulary.

pub mod handle;
pub mod solver;
mod status;

pub use handle::HighsHandle;
pub use solver::HighsSolver;
