//! Product search query encoding.
//!
//! A [`ProductQuery`] is the ordered list of `(key, value)` filters sent to
//! the product search endpoint. Unset facets are omitted entirely; pairs
//! always appear in the order brand, model, year, category.

use partfinder_model::{Brand, Category, FacetLevel, FacetOption, Model, YearRange};
use url::form_urlencoded;

use crate::filter::Selection;

/// Filters for one product search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ProductQuery {
    pub fn builder() -> ProductQueryBuilder {
        ProductQueryBuilder::new()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// True when the query carries no filters and matches every product.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering of the pairs.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// Fluent API for building product queries.
///
/// Setter order does not matter; [`build`](Self::build) emits pairs in the
/// canonical order.
#[derive(Debug, Clone, Default)]
pub struct ProductQueryBuilder {
    brand: Option<String>,
    model: Option<String>,
    year: Option<String>,
    category: Option<String>,
}

impl ProductQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: &Brand) -> Self {
        self.brand = Some(brand.key().into_owned());
        self
    }

    pub fn model(mut self, model: &Model) -> Self {
        self.model = Some(model.key().into_owned());
        self
    }

    pub fn year_range(mut self, range: &YearRange) -> Self {
        self.year = Some(range.key().into_owned());
        self
    }

    pub fn category(mut self, category: &Category) -> Self {
        self.category = Some(category.key().into_owned());
        self
    }

    pub fn build(self) -> ProductQuery {
        let slots = [
            (FacetLevel::Brand, self.brand),
            (FacetLevel::Model, self.model),
            (FacetLevel::YearRange, self.year),
            (FacetLevel::Category, self.category),
        ];

        ProductQuery {
            pairs: slots
                .into_iter()
                .filter_map(|(level, value)| {
                    value.map(|value| (level.query_key(), value))
                })
                .collect(),
        }
    }
}

/// Encodes the set levels of `selection` as a product query.
pub fn encode(selection: &Selection) -> ProductQuery {
    let mut builder = ProductQueryBuilder::new();
    if let Some(brand) = selection.brand() {
        builder = builder.brand(brand);
    }
    if let Some(model) = selection.model() {
        builder = builder.model(model);
    }
    if let Some(range) = selection.year_range() {
        builder = builder.year_range(range);
    }
    if let Some(category) = selection.category() {
        builder = builder.category(category);
    }
    builder.build()
}
