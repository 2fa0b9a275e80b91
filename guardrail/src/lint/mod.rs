//! Heuristic linters for generated source fragments.
//!
//! Every checker here is a lexical scanner, not a parser. Each takes the
//! fragment text and the shared [`ValidationOutcome`](crate::outcome::ValidationOutcome)
//! accumulator, runs independently of the others, and has no side effects
//! beyond the findings it appends.

pub mod brackets;
pub mod compliance;
pub mod declaration;
pub mod markup;
