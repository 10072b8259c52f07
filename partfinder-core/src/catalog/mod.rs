//! Access to the remote parts catalog.
//!
//! [`FacetCatalog`] is the seam between the filter/session logic and the
//! backend. [`HttpCatalog`] talks to the real REST service; tests use the
//! generated `MockFacetCatalog` or a hand-written stub.

pub mod http;

use async_trait::async_trait;
use partfinder_model::{Brand, Category, Model, Product, YearRange};

use crate::error::CatalogResult;
use crate::query::ProductQuery;
use crate::upload::UploadRequest;

pub use http::HttpCatalog;

/// Read and import operations offered by the catalog backend.
///
/// Brands and models are addressed by name; every list operation returns an
/// empty list when the backend has nothing to offer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacetCatalog: Send + Sync {
    /// All brands, in backend order.
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>>;

    /// Models sold under `brand`.
    async fn list_models(&self, brand: &Brand) -> CatalogResult<Vec<Model>>;

    /// Production year ranges of `model` under `brand`.
    async fn list_year_ranges(
        &self,
        brand: &Brand,
        model: &Model,
    ) -> CatalogResult<Vec<YearRange>>;

    /// All product categories.
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Products matching every filter carried by `query`.
    async fn search_products(
        &self,
        query: &ProductQuery,
    ) -> CatalogResult<Vec<Product>>;

    /// Imports a product CSV under a new root category.
    async fn upload_csv(&self, request: UploadRequest) -> CatalogResult<()>;
}

#[async_trait]
impl<C> FacetCatalog for std::sync::Arc<C>
where
    C: FacetCatalog + ?Sized,
{
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
        (**self).list_brands().await
    }

    async fn list_models(&self, brand: &Brand) -> CatalogResult<Vec<Model>> {
        (**self).list_models(brand).await
    }

    async fn list_year_ranges(
        &self,
        brand: &Brand,
        model: &Model,
    ) -> CatalogResult<Vec<YearRange>> {
        (**self).list_year_ranges(brand, model).await
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        (**self).list_categories().await
    }

    async fn search_products(
        &self,
        query: &ProductQuery,
    ) -> CatalogResult<Vec<Product>> {
        (**self).search_products(query).await
    }

    async fn upload_csv(&self, request: UploadRequest) -> CatalogResult<()> {
        (**self).upload_csv(request).await
    }
}
