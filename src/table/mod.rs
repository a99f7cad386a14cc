//! Results tables for questions and questionnaires.
//!
//! Filtering by tag, row projection (short ids, truncated titles, last
//! modification date), per-row actions and the creator-name cache.

mod filter;
mod names;
mod rows;

pub use filter::*;
pub use names::*;
pub use rows::*;
