//! Snapshot of the model surface for presentation layers.
//! Prefer importing from here over individual modules in UI and CLI code.

pub use super::category::Category;
pub use super::facet::{FacetLevel, FacetOption};
pub use super::ids::{BrandID, CategoryID, ModelID, ProductID};
pub use super::product::{Fitment, Product};
pub use super::vehicle::{Brand, Model, OPEN_END_YEAR, YearRange};
