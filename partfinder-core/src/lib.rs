//! # Partfinder Core
//!
//! Client-side logic for searching a motorcycle parts catalog by vehicle and
//! category.
//!
//! ## Overview
//!
//! - [`filter`]: the dependent brand → model → year range facet chain, with
//!   an independent category facet. Pure state; fetches are returned to the
//!   caller as [`FetchRequest`]s and results fed back in any order.
//! - [`query`]: encodes a selection as product search parameters.
//! - [`pager`]: fixed-size client-side pagination with a page-link window.
//! - [`catalog`]: the [`FacetCatalog`] trait and its HTTP implementation.
//! - [`session`]: ties the above together for a single user.
//!
//! ## Examples
//!
//! ```no_run
//! use partfinder_core::{FacetLevel, HttpCatalog, SearchSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = HttpCatalog::new("http://localhost:8000")?;
//! let mut session = SearchSession::new(catalog);
//! session.bootstrap().await?;
//! session.select_by_key(FacetLevel::Brand, "KTM").await?;
//! let found = session.search().await?;
//! println!("{found} parts on {} pages", session.results().total_pages());
//! # Ok(())
//! # }
//! ```
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod pager;
pub mod query;
pub mod session;
pub mod upload;

pub use catalog::{FacetCatalog, HttpCatalog};
pub use error::{CatalogError, CatalogResult, SessionError};
pub use filter::{
    ApplyOutcome, FacetChoice, FacetOptions, FetchOutcome, FetchRequest, FetchScope,
    FetchedOptions, FilterMachine, FilterPolicy, Rejected, Selection, Ticket,
};
pub use pager::{PAGE_SIZE, PageWindow, Paginator};
pub use query::{ProductQuery, ProductQueryBuilder, encode};
pub use session::SearchSession;
pub use upload::UploadRequest;

pub use partfinder_model::prelude::*;
