use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use partfinder_model::{Brand, Category, FacetOption, Model, Product, YearRange};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::FacetCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::query::ProductQuery;
use crate::upload::UploadRequest;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`FacetCatalog`] backed by the catalog REST service.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url)
            .map_err(|err| CatalogError::InvalidUrl(format!("{base_url}: {err}")))?;
        Self::from_client(client, base_url)
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client, base_url: Url) -> CatalogResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        info!("[HttpCatalog] Using catalog at {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::InvalidUrl(format!(
                    "{} cannot be used as a base URL",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_list<T>(&self, url: Url, what: &'static str) -> CatalogResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        debug!("[HttpCatalog] GET {}", url);
        let response = self.client.get(url.clone()).send().await.inspect_err(|err| {
            warn!("[HttpCatalog] GET {} failed: {}", url, err);
        })?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;

        // The backend encodes an empty list as `null`.
        let items: Option<Vec<T>> = serde_json::from_slice(&bytes)
            .map_err(|source| CatalogError::Decode { what, source })?;
        let items = items.unwrap_or_default();
        debug!("[HttpCatalog] Received {} {}", items.len(), what);
        Ok(items)
    }
}

async fn ensure_success(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    warn!("[HttpCatalog] {} responded with {}: {}", url, status, body);
    Err(CatalogError::Status { status, body })
}

#[async_trait]
impl FacetCatalog for HttpCatalog {
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
        let url = self.endpoint(&["brands"])?;
        self.get_list(url, "brands").await
    }

    async fn list_models(&self, brand: &Brand) -> CatalogResult<Vec<Model>> {
        let url = self.endpoint(&["brands", &*brand.key(), "models"])?;
        self.get_list(url, "models").await
    }

    async fn list_year_ranges(
        &self,
        brand: &Brand,
        model: &Model,
    ) -> CatalogResult<Vec<YearRange>> {
        let url = self.endpoint(&[
            "brands",
            &*brand.key(),
            "models",
            &*model.key(),
            "years",
        ])?;
        self.get_list(url, "year ranges").await
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let url = self.endpoint(&["categories"])?;
        self.get_list(url, "categories").await
    }

    async fn search_products(
        &self,
        query: &ProductQuery,
    ) -> CatalogResult<Vec<Product>> {
        let mut url = self.endpoint(&["products"])?;
        if !query.is_empty() {
            url.set_query(Some(&query.to_query_string()));
        }
        self.get_list(url, "products").await
    }

    async fn upload_csv(&self, request: UploadRequest) -> CatalogResult<()> {
        let url = self.endpoint(&["upload"])?;
        let contents = tokio::fs::read(request.path()).await?;
        let size = contents.len();

        let file = Part::bytes(contents)
            .file_name(request.file_name())
            .mime_str("text/csv")?;
        let form = Form::new()
            .part("file", file)
            .text("category", request.category().to_string());

        info!(
            "[HttpCatalog] Uploading {} ({} bytes) as category '{}'",
            request.file_name(),
            size,
            request.category()
        );
        let response = self.client.post(url).multipart(form).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
