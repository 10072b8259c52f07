use partfinder_model::{Brand, Category, FacetLevel, Model, YearRange};
use tracing::{debug, warn};

use crate::catalog::FacetCatalog;
use crate::error::{CatalogError, CatalogResult};

/// Identifies one issued fetch. Tickets are unique per machine and only the
/// newest ticket for a level is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub(crate) u64);

/// Which option list a fetch loads. Scoped lists carry the parents they
/// were issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    Brands,
    Categories,
    Models { brand: Brand },
    YearRanges { brand: Brand, model: Model },
}

impl FetchScope {
    /// Level whose option list this scope refreshes.
    pub fn level(&self) -> FacetLevel {
        match self {
            FetchScope::Brands => FacetLevel::Brand,
            FetchScope::Categories => FacetLevel::Category,
            FetchScope::Models { .. } => FacetLevel::Model,
            FetchScope::YearRanges { .. } => FacetLevel::YearRange,
        }
    }
}

/// An option-list fetch the caller must run on behalf of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    ticket: Ticket,
    scope: FetchScope,
}

impl FetchRequest {
    pub(crate) fn new(ticket: Ticket, scope: FetchScope) -> Self {
        Self { ticket, scope }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn scope(&self) -> &FetchScope {
        &self.scope
    }

    pub fn level(&self) -> FacetLevel {
        self.scope.level()
    }

    /// Pairs a result obtained elsewhere with this request's ticket.
    pub fn complete(&self, options: FetchedOptions) -> FetchOutcome {
        FetchOutcome {
            ticket: self.ticket,
            options,
        }
    }

    pub async fn run<C>(self, catalog: &C) -> FetchOutcome
    where
        C: FacetCatalog + ?Sized,
    {
        debug!(ticket = self.ticket.0, scope = ?self.scope, "fetching facet options");
        let options = match self.scope {
            FetchScope::Brands => {
                FetchedOptions::Brands(catalog.list_brands().await)
            }
            FetchScope::Categories => {
                FetchedOptions::Categories(catalog.list_categories().await)
            }
            FetchScope::Models { brand } => {
                let result = catalog.list_models(&brand).await;
                FetchedOptions::Models { brand, result }
            }
            FetchScope::YearRanges { brand, model } => {
                let result = catalog.list_year_ranges(&brand, &model).await;
                FetchedOptions::YearRanges {
                    brand,
                    model,
                    result,
                }
            }
        };

        if let Some(err) = options.error() {
            warn!(level = %options.level(), error = %err, "facet fetch failed");
        }
        FetchOutcome {
            ticket: self.ticket,
            options,
        }
    }
}

/// Result of loading one option list.
#[derive(Debug)]
pub enum FetchedOptions {
    Brands(CatalogResult<Vec<Brand>>),
    Categories(CatalogResult<Vec<Category>>),
    Models {
        brand: Brand,
        result: CatalogResult<Vec<Model>>,
    },
    YearRanges {
        brand: Brand,
        model: Model,
        result: CatalogResult<Vec<YearRange>>,
    },
}

impl FetchedOptions {
    pub fn level(&self) -> FacetLevel {
        match self {
            FetchedOptions::Brands(_) => FacetLevel::Brand,
            FetchedOptions::Categories(_) => FacetLevel::Category,
            FetchedOptions::Models { .. } => FacetLevel::Model,
            FetchedOptions::YearRanges { .. } => FacetLevel::YearRange,
        }
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            FetchedOptions::Brands(result) => result.as_ref().err(),
            FetchedOptions::Categories(result) => result.as_ref().err(),
            FetchedOptions::Models { result, .. } => result.as_ref().err(),
            FetchedOptions::YearRanges { result, .. } => result.as_ref().err(),
        }
    }
}

/// Completion of a [`FetchRequest`], fed back into
/// [`FilterMachine::apply`](super::FilterMachine::apply).
#[derive(Debug)]
pub struct FetchOutcome {
    ticket: Ticket,
    options: FetchedOptions,
}

impl FetchOutcome {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn level(&self) -> FacetLevel {
        self.options.level()
    }

    pub fn error(&self) -> Option<&CatalogError> {
        self.options.error()
    }

    pub(crate) fn into_options(self) -> FetchedOptions {
        self.options
    }
}
