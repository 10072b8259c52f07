use std::collections::HashMap;

use partfinder_model::{Brand, Category, FacetLevel, FacetOption, Model, YearRange};
use thiserror::Error;
use tracing::{debug, info};

use super::fetch::{FetchOutcome, FetchRequest, FetchScope, FetchedOptions, Ticket};
use super::selection::{FacetChoice, Selection};
use crate::error::CatalogError;

/// Knobs for coupling between the vehicle chain and the category facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Unset the category whenever the selected brand changes.
    pub reset_category_on_brand_change: bool,
}

/// Options currently offered at each facet level.
///
/// Model and year-range options always belong to the selection above them;
/// they are emptied as soon as that selection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    pub brands: Vec<Brand>,
    pub models: Vec<Model>,
    pub year_ranges: Vec<YearRange>,
    pub categories: Vec<Category>,
}

impl FacetOptions {
    /// Offered option at `level` whose identity key equals `key`.
    pub fn find(&self, level: FacetLevel, key: &str) -> Option<FacetChoice> {
        fn pick<T: FacetOption + Clone>(items: &[T], key: &str) -> Option<T> {
            items.iter().find(|item| item.key() == key).cloned()
        }

        match level {
            FacetLevel::Brand => pick(&self.brands, key).map(FacetChoice::Brand),
            FacetLevel::Model => pick(&self.models, key).map(FacetChoice::Model),
            FacetLevel::YearRange => {
                pick(&self.year_ranges, key).map(FacetChoice::YearRange)
            }
            FacetLevel::Category => {
                pick(&self.categories, key).map(FacetChoice::Category)
            }
        }
    }

    fn offers(&self, choice: &FacetChoice) -> bool {
        self.find(choice.level(), &choice.key()).is_some()
    }
}

/// Why a choice was refused. The selection is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    #[error("{0} cannot be chosen until its parent facet is selected")]
    ParentUnset(FacetLevel),

    #[error("No {level} option '{key}' is currently offered")]
    NotOffered { level: FacetLevel, key: String },
}

/// What [`FilterMachine::apply`] did with a completed fetch.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The option list at `level` was replaced with `count` entries.
    Applied { level: FacetLevel, count: usize },
    /// The fetch was superseded by a newer one for the same level, or its
    /// parent is no longer selected; dropped.
    Stale { level: FacetLevel },
    /// The fetch failed; selection and option lists are unchanged.
    Failed {
        level: FacetLevel,
        error: CatalogError,
    },
}

impl ApplyOutcome {
    pub fn level(&self) -> FacetLevel {
        match self {
            ApplyOutcome::Applied { level, .. }
            | ApplyOutcome::Stale { level }
            | ApplyOutcome::Failed { level, .. } => *level,
        }
    }
}

/// Dependent-facet filter state.
///
/// The machine never performs I/O. Transitions return the
/// [`FetchRequest`]s the caller must run; their results are fed back with
/// [`apply`](Self::apply) in any order. Each level awaits at most one
/// ticket; replies carrying any other ticket are stale.
#[derive(Debug, Clone, Default)]
pub struct FilterMachine {
    selection: Selection,
    options: FacetOptions,
    policy: FilterPolicy,
    pending: HashMap<FacetLevel, Ticket>,
    next_ticket: u64,
}

impl FilterMachine {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Whether a picker for `level` accepts input.
    ///
    /// Brand and category are always enabled; model needs a brand and year
    /// range needs a model.
    pub fn is_enabled(&self, level: FacetLevel) -> bool {
        match level.parent() {
            Some(parent) => self.selection.is_set(parent),
            None => true,
        }
    }

    /// Whether the most recent fetch for `level` is still outstanding.
    pub fn is_loading(&self, level: FacetLevel) -> bool {
        self.pending.contains_key(&level)
    }

    /// Requests for the unscoped option lists, issued once at startup.
    pub fn bootstrap(&mut self) -> Vec<FetchRequest> {
        vec![
            self.issue(FetchScope::Brands),
            self.issue(FetchScope::Categories),
        ]
    }

    /// Reloads the option list at `level` for the current selection.
    ///
    /// `None` when a chained level's parent is unset. Any outstanding fetch
    /// for the level is superseded.
    pub fn refresh(&mut self, level: FacetLevel) -> Option<FetchRequest> {
        let scope = match level {
            FacetLevel::Brand => FetchScope::Brands,
            FacetLevel::Category => FetchScope::Categories,
            FacetLevel::Model => FetchScope::Models {
                brand: self.selection.brand.clone()?,
            },
            FacetLevel::YearRange => FetchScope::YearRanges {
                brand: self.selection.brand.clone()?,
                model: self.selection.model.clone()?,
            },
        };
        Some(self.issue(scope))
    }

    /// Chooses an option, clearing everything downstream of its level.
    ///
    /// The option must be among those currently offered, and a chained
    /// level's parent must already be set. Choosing the same brand or model
    /// again reloads its dependent list if that list is empty and idle, so
    /// a failed fetch can be retried.
    pub fn select(
        &mut self,
        choice: impl Into<FacetChoice>,
    ) -> Result<Vec<FetchRequest>, Rejected> {
        let choice = choice.into();
        let level = choice.level();

        if !self.is_enabled(level) {
            return Err(Rejected::ParentUnset(level));
        }
        if !self.options.offers(&choice) {
            return Err(Rejected::NotOffered {
                level,
                key: choice.key().into_owned(),
            });
        }

        let before = self.selection.clone();
        match choice {
            FacetChoice::Brand(brand) => self.selection.brand = Some(brand),
            FacetChoice::Model(model) => self.selection.model = Some(model),
            FacetChoice::YearRange(range) => {
                self.selection.year_range = Some(range)
            }
            FacetChoice::Category(category) => {
                self.selection.category = Some(category)
            }
        }
        for downstream in level.downstream() {
            self.selection.unset(*downstream);
        }

        debug!(%level, "facet selected");
        Ok(self.reconcile(&before, Some(level)))
    }

    /// Unsets `level` and everything downstream of it.
    pub fn clear(&mut self, level: FacetLevel) {
        let before = self.selection.clone();
        self.selection.unset(level);
        for downstream in level.downstream() {
            self.selection.unset(*downstream);
        }

        debug!(%level, "facet cleared");
        // Clearing never issues a fetch; the scoped caches are just emptied.
        let requests = self.reconcile(&before, None);
        debug_assert!(requests.is_empty());
    }

    /// Unsets every level.
    pub fn clear_all(&mut self) {
        let before = std::mem::take(&mut self.selection);
        let requests = self.reconcile(&before, None);
        debug_assert!(requests.is_empty());
    }

    /// Folds a completed fetch into the option lists.
    ///
    /// Only the newest fetch for a level is applied. Results for a brand or
    /// model that is no longer selected, or superseded by a later request,
    /// are dropped as [`ApplyOutcome::Stale`].
    pub fn apply(&mut self, outcome: FetchOutcome) -> ApplyOutcome {
        let level = outcome.level();
        let ticket = outcome.ticket();
        if self.pending.get(&level) != Some(&ticket) {
            debug!(%level, ticket = ticket.0, "dropping stale fetch result");
            return ApplyOutcome::Stale { level };
        }
        self.pending.remove(&level);

        let applied = match outcome.into_options() {
            FetchedOptions::Brands(result) => {
                result.map(|items| replace(&mut self.options.brands, items))
            }
            FetchedOptions::Categories(result) => result
                .map(|items| replace(&mut self.options.categories, items)),
            FetchedOptions::Models { result, .. } => {
                result.map(|items| replace(&mut self.options.models, items))
            }
            FetchedOptions::YearRanges { result, .. } => result
                .map(|items| replace(&mut self.options.year_ranges, items)),
        };

        match applied {
            Ok(count) => {
                info!(%level, count, "facet options loaded");
                ApplyOutcome::Applied { level, count }
            }
            Err(error) => ApplyOutcome::Failed { level, error },
        }
    }

    /// Re-scopes dependent option lists after the selection moved away
    /// from `before`, returning the fetches the new selection needs.
    ///
    /// `chosen` is the level just selected, if any; re-choosing a parent
    /// whose dependent list is empty and idle reloads that list.
    fn reconcile(
        &mut self,
        before: &Selection,
        chosen: Option<FacetLevel>,
    ) -> Vec<FetchRequest> {
        let mut scopes = Vec::new();

        let brand_changed = before.key(FacetLevel::Brand)
            != self.selection.key(FacetLevel::Brand);
        let model_changed = before.key(FacetLevel::Model)
            != self.selection.key(FacetLevel::Model);

        if brand_changed {
            self.options.models.clear();
            self.pending.remove(&FacetLevel::Model);
            if self.policy.reset_category_on_brand_change {
                self.selection.category = None;
            }
        }
        let retry_models = chosen == Some(FacetLevel::Brand)
            && self.options.models.is_empty()
            && !self.is_loading(FacetLevel::Model);
        if brand_changed || retry_models {
            if let Some(brand) = &self.selection.brand {
                scopes.push(FetchScope::Models {
                    brand: brand.clone(),
                });
            }
        }

        if brand_changed || model_changed {
            self.options.year_ranges.clear();
            self.pending.remove(&FacetLevel::YearRange);
        }
        let retry_years = chosen == Some(FacetLevel::Model)
            && self.options.year_ranges.is_empty()
            && !self.is_loading(FacetLevel::YearRange);
        if brand_changed || model_changed || retry_years {
            if let (Some(brand), Some(model)) =
                (&self.selection.brand, &self.selection.model)
            {
                scopes.push(FetchScope::YearRanges {
                    brand: brand.clone(),
                    model: model.clone(),
                });
            }
        }

        scopes.into_iter().map(|scope| self.issue(scope)).collect()
    }

    /// Hands out the next ticket and makes it the one `scope`'s level awaits.
    fn issue(&mut self, scope: FetchScope) -> FetchRequest {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending.insert(scope.level(), ticket);
        FetchRequest::new(ticket, scope)
    }
}

fn replace<T>(slot: &mut Vec<T>, items: Vec<T>) -> usize {
    *slot = items;
    slot.len()
}
