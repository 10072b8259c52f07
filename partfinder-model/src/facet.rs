use std::borrow::Cow;
use std::fmt;

/// A position in the facet dependency chain.
///
/// `Brand`, `Model` and `YearRange` form a chain where each level is scoped
/// to the levels above it. `Category` sits outside the chain and can be
/// picked at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FacetLevel {
    Brand,
    Model,
    YearRange,
    Category,
}

impl FacetLevel {
    pub fn all() -> &'static [FacetLevel] {
        use FacetLevel::*;
        &[Brand, Model, YearRange, Category]
    }

    /// Whether this level participates in the brand → model → year chain.
    pub fn is_chained(&self) -> bool {
        !matches!(self, FacetLevel::Category)
    }

    /// The level whose selection scopes this one, if any.
    pub fn parent(&self) -> Option<FacetLevel> {
        match self {
            FacetLevel::Model => Some(FacetLevel::Brand),
            FacetLevel::YearRange => Some(FacetLevel::Model),
            FacetLevel::Brand | FacetLevel::Category => None,
        }
    }

    /// Levels strictly downstream of this one in the chain, nearest first.
    pub fn downstream(&self) -> &'static [FacetLevel] {
        match self {
            FacetLevel::Brand => &[FacetLevel::Model, FacetLevel::YearRange],
            FacetLevel::Model => &[FacetLevel::YearRange],
            FacetLevel::YearRange | FacetLevel::Category => &[],
        }
    }

    /// Query parameter name used by the product search endpoint.
    pub fn query_key(&self) -> &'static str {
        match self {
            FacetLevel::Brand => "brand",
            FacetLevel::Model => "model",
            FacetLevel::YearRange => "year",
            FacetLevel::Category => "category_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FacetLevel::Brand => "brand",
            FacetLevel::Model => "model",
            FacetLevel::YearRange => "year range",
            FacetLevel::Category => "category",
        }
    }
}

impl fmt::Display for FacetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An option offered by one facet level.
///
/// `key` is the stable identity used for equality, re-fetch routing and
/// query encoding. `label` is for display only.
pub trait FacetOption {
    const LEVEL: FacetLevel;

    fn key(&self) -> Cow<'_, str>;

    fn label(&self) -> Cow<'_, str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downstream_follows_chain_order() {
        assert_eq!(
            FacetLevel::Brand.downstream(),
            &[FacetLevel::Model, FacetLevel::YearRange]
        );
        assert_eq!(FacetLevel::Model.downstream(), &[FacetLevel::YearRange]);
        assert!(FacetLevel::YearRange.downstream().is_empty());
        assert!(FacetLevel::Category.downstream().is_empty());
    }

    #[test]
    fn category_is_outside_the_chain() {
        assert!(!FacetLevel::Category.is_chained());
        assert_eq!(FacetLevel::Category.parent(), None);
        assert_eq!(FacetLevel::YearRange.parent(), Some(FacetLevel::Model));
    }
}
