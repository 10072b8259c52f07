use std::borrow::Cow;

use partfinder_model::{Brand, Category, FacetLevel, FacetOption, Model, YearRange};

/// The user's current choice at each facet level.
///
/// Only [`FilterMachine`](super::FilterMachine) mutates a selection, so a
/// model is never set without a brand and a year range never without a
/// model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub(crate) brand: Option<Brand>,
    pub(crate) model: Option<Model>,
    pub(crate) year_range: Option<YearRange>,
    pub(crate) category: Option<Category>,
}

impl Selection {
    pub fn brand(&self) -> Option<&Brand> {
        self.brand.as_ref()
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn year_range(&self) -> Option<&YearRange> {
        self.year_range.as_ref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn is_set(&self, level: FacetLevel) -> bool {
        self.key(level).is_some()
    }

    /// Identity key of the option chosen at `level`.
    pub fn key(&self, level: FacetLevel) -> Option<Cow<'_, str>> {
        match level {
            FacetLevel::Brand => self.brand.as_ref().map(FacetOption::key),
            FacetLevel::Model => self.model.as_ref().map(FacetOption::key),
            FacetLevel::YearRange => {
                self.year_range.as_ref().map(FacetOption::key)
            }
            FacetLevel::Category => {
                self.category.as_ref().map(FacetOption::key)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        FacetLevel::all().iter().all(|level| !self.is_set(*level))
    }

    pub(crate) fn unset(&mut self, level: FacetLevel) {
        match level {
            FacetLevel::Brand => self.brand = None,
            FacetLevel::Model => self.model = None,
            FacetLevel::YearRange => self.year_range = None,
            FacetLevel::Category => self.category = None,
        }
    }
}

/// A single option chosen at its facet level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetChoice {
    Brand(Brand),
    Model(Model),
    YearRange(YearRange),
    Category(Category),
}

impl FacetChoice {
    pub fn level(&self) -> FacetLevel {
        match self {
            FacetChoice::Brand(_) => FacetLevel::Brand,
            FacetChoice::Model(_) => FacetLevel::Model,
            FacetChoice::YearRange(_) => FacetLevel::YearRange,
            FacetChoice::Category(_) => FacetLevel::Category,
        }
    }

    pub fn key(&self) -> Cow<'_, str> {
        match self {
            FacetChoice::Brand(brand) => brand.key(),
            FacetChoice::Model(model) => model.key(),
            FacetChoice::YearRange(range) => range.key(),
            FacetChoice::Category(category) => category.key(),
        }
    }

    pub fn label(&self) -> Cow<'_, str> {
        match self {
            FacetChoice::Brand(brand) => brand.label(),
            FacetChoice::Model(model) => model.label(),
            FacetChoice::YearRange(range) => range.label(),
            FacetChoice::Category(category) => category.label(),
        }
    }
}

impl From<Brand> for FacetChoice {
    fn from(value: Brand) -> Self {
        FacetChoice::Brand(value)
    }
}

impl From<Model> for FacetChoice {
    fn from(value: Model) -> Self {
        FacetChoice::Model(value)
    }
}

impl From<YearRange> for FacetChoice {
    fn from(value: YearRange) -> Self {
        FacetChoice::YearRange(value)
    }
}

impl From<Category> for FacetChoice {
    fn from(value: Category) -> Self {
        FacetChoice::Category(value)
    }
}
