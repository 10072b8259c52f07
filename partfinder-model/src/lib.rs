//! Catalog data model shared across partfinder crates.
#![allow(missing_docs)]

pub mod category;
pub mod error;
pub mod facet;
pub mod ids;
pub mod prelude;
pub mod product;
pub mod vehicle;

pub use category::Category;
pub use error::{ModelError, Result as ModelResult};
pub use facet::{FacetLevel, FacetOption};
pub use ids::{BrandID, CategoryID, ModelID, ProductID};
pub use product::{Fitment, Product};
pub use vehicle::{Brand, Model, OPEN_END_YEAR, YearRange};
