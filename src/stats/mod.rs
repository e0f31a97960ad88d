//! Statistical test library
//!
//! Pure, stateless functions. Each takes two empirical distributions (or two
//! schema maps) and returns a numeric signal plus an interpretation. No I/O,
//! no state.

pub mod association;
pub mod psi;
pub mod schema;
pub mod zscore;

pub use association::{categorical_association, Association, AssociationOutcome};
pub use psi::psi;
pub use schema::{schema_diff, SchemaDiff};
pub use zscore::zscore;
