//! Dependent facet filtering.
//!
//! Brand → model → year range form a chain: each level's options are
//! fetched for the selection above it, and changing a level clears
//! everything below. Category is independent of the chain.

mod fetch;
mod machine;
mod selection;

pub use fetch::{FetchOutcome, FetchRequest, FetchScope, FetchedOptions, Ticket};
pub use machine::{ApplyOutcome, FacetOptions, FilterMachine, FilterPolicy, Rejected};
pub use selection::{FacetChoice, Selection};
