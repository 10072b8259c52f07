//! A single user's search session: facet filter, product results and the
//! pager over them, driven against one catalog.

use futures::future::join_all;
use partfinder_model::{FacetLevel, Product};
use tracing::{info, warn};

use crate::catalog::FacetCatalog;
use crate::error::{Result, SessionError};
use crate::filter::{
    ApplyOutcome, FacetChoice, FetchRequest, FilterMachine, FilterPolicy, Rejected,
};
use crate::pager::{PAGE_SIZE, Paginator};
use crate::query::{self, ProductQuery};
use crate::upload::UploadRequest;

#[derive(Debug)]
pub struct SearchSession<C> {
    catalog: C,
    filter: FilterMachine,
    results: Paginator<Product>,
}

impl<C: FacetCatalog> SearchSession<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, FilterPolicy::default(), PAGE_SIZE)
    }

    pub fn with_options(catalog: C, policy: FilterPolicy, page_size: usize) -> Self {
        Self {
            catalog,
            filter: FilterMachine::new(policy),
            results: Paginator::with_page_size(page_size),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterMachine {
        &self.filter
    }

    pub fn results(&self) -> &Paginator<Product> {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut Paginator<Product> {
        &mut self.results
    }

    /// The query the current selection would search with.
    pub fn query(&self) -> ProductQuery {
        query::encode(self.filter.selection())
    }

    /// Loads the brand and category lists.
    pub async fn bootstrap(&mut self) -> Result<()> {
        let requests = self.filter.bootstrap();
        self.run(requests).await
    }

    /// Reloads the option list at `level`. Chained levels whose parent is
    /// unset are rejected with [`SessionError::LevelDisabled`].
    pub async fn refresh(&mut self, level: FacetLevel) -> Result<()> {
        let request = self
            .filter
            .refresh(level)
            .ok_or(SessionError::LevelDisabled(level))?;
        self.run(vec![request]).await
    }

    pub async fn select(&mut self, choice: impl Into<FacetChoice>) -> Result<()> {
        let requests = self.filter.select(choice).map_err(|rejected| match rejected {
            Rejected::ParentUnset(level) => SessionError::LevelDisabled(level),
            Rejected::NotOffered { level, key } => {
                SessionError::UnknownOption { level, key }
            }
        })?;
        self.run(requests).await
    }

    /// Selects the offered option at `level` whose identity key is `key`.
    pub async fn select_by_key(&mut self, level: FacetLevel, key: &str) -> Result<()> {
        if !self.filter.is_enabled(level) {
            return Err(SessionError::LevelDisabled(level));
        }
        let choice = self.filter.options().find(level, key).ok_or_else(|| {
            SessionError::UnknownOption {
                level,
                key: key.to_string(),
            }
        })?;
        self.select(choice).await
    }

    pub fn clear(&mut self, level: FacetLevel) {
        self.filter.clear(level);
    }

    pub fn clear_all(&mut self) {
        self.filter.clear_all();
    }

    /// Runs a product search for the current selection.
    ///
    /// On failure the previous results and page are kept.
    pub async fn search(&mut self) -> Result<usize> {
        let query = self.query();
        info!(query = %query.to_query_string(), "searching products");

        match self.catalog.search_products(&query).await {
            Ok(products) => {
                let count = products.len();
                self.results.set_results(products);
                info!(count, pages = self.results.total_pages(), "search complete");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "product search failed");
                Err(err.into())
            }
        }
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<()> {
        let file = request.file_name();
        let category = request.category().to_string();
        self.catalog.upload_csv(request).await?;
        info!(%file, %category, "upload accepted");
        Ok(())
    }

    /// Runs `requests` concurrently and applies every outcome. The first
    /// failure is returned after all outcomes have been applied.
    async fn run(&mut self, requests: Vec<FetchRequest>) -> Result<()> {
        let catalog = &self.catalog;
        let outcomes =
            join_all(requests.into_iter().map(|request| request.run(catalog))).await;

        let mut first_error = None;
        for outcome in outcomes {
            if let ApplyOutcome::Failed { error, .. } = self.filter.apply(outcome) {
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}
