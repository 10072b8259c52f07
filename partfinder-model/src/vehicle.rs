//! Brand, model and model-year types that make up the vehicle facet chain.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::facet::{FacetLevel, FacetOption};
use crate::ids::{BrandID, ModelID};

/// End year stored by the catalog for ranges that are still in production.
pub const OPEN_END_YEAR: u16 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brand {
    pub id: BrandID,
    pub name: String,
}

impl Brand {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: BrandID(id),
            name: name.into(),
        }
    }
}

impl FacetOption for Brand {
    const LEVEL: FacetLevel = FacetLevel::Brand;

    // Backend routes are keyed by brand name, not by ID.
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    pub id: ModelID,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub brand_id: Option<BrandID>,
}

impl Model {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: ModelID(id),
            name: name.into(),
            brand_id: None,
        }
    }
}

impl FacetOption for Model {
    const LEVEL: FacetLevel = FacetLevel::Model;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Production years of a model, inclusive on both ends.
///
/// An `end_year` of [`OPEN_END_YEAR`] means the model is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearRange {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "startyear", alias = "startYear", alias = "start_year")
    )]
    pub start_year: u16,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "endyear", alias = "endYear", alias = "end_year")
    )]
    pub end_year: u16,
}

impl YearRange {
    pub fn new(start_year: u16, end_year: u16) -> Result<Self, ModelError> {
        if end_year < start_year {
            return Err(ModelError::InvertedYearRange {
                start: start_year,
                end: end_year,
            });
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    pub fn open_ended(start_year: u16) -> Self {
        Self {
            start_year,
            end_year: OPEN_END_YEAR,
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_year == OPEN_END_YEAR
    }

    pub fn contains(&self, year: u16) -> bool {
        self.start_year <= year && year <= self.end_year
    }

    /// Wire form used by the product search: `START-END`, or `START-` when
    /// the range is open-ended.
    pub fn encode(&self) -> String {
        if self.is_open_ended() {
            format!("{}-", self.start_year)
        } else {
            format!("{}-{}", self.start_year, self.end_year)
        }
    }
}

impl FacetOption for YearRange {
    const LEVEL: FacetLevel = FacetLevel::YearRange;

    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.encode())
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "{} - ", self.start_year)
        } else {
            write!(f, "{} - {}", self.start_year, self.end_year)
        }
    }
}

/// Parses `2015-2019`, `2015-` and `2015-9999`.
impl FromStr for YearRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidYearRange(s.to_string());

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start: u16 = start.trim().parse().map_err(|_| invalid())?;
        let end = end.trim();
        if end.is_empty() {
            return Ok(YearRange::open_ended(start));
        }
        let end: u16 = end.parse().map_err(|_| invalid())?;
        YearRange::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ended_range_encodes_with_empty_end() {
        let range = YearRange::new(2015, OPEN_END_YEAR).unwrap();
        assert_eq!(range.encode(), "2015-");
        assert_eq!(range.to_string(), "2015 - ");
    }

    #[test]
    fn closed_range_encodes_both_years() {
        let range = YearRange::new(2008, 2011).unwrap();
        assert_eq!(range.encode(), "2008-2011");
        assert_eq!(range.key(), "2008-2011");
        assert_eq!(range.label(), "2008 - 2011");
    }

    #[test]
    fn parses_wire_forms() {
        assert_eq!(
            "2015-".parse::<YearRange>().unwrap(),
            YearRange::open_ended(2015)
        );
        assert_eq!(
            "2015-9999".parse::<YearRange>().unwrap(),
            YearRange::open_ended(2015)
        );
        assert_eq!(
            " 2008 - 2011 ".parse::<YearRange>().unwrap(),
            YearRange::new(2008, 2011).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(matches!(
            "2015".parse::<YearRange>(),
            Err(ModelError::InvalidYearRange(_))
        ));
        assert!(matches!(
            "abc-2011".parse::<YearRange>(),
            Err(ModelError::InvalidYearRange(_))
        ));
        assert_eq!(
            "2011-2008".parse::<YearRange>(),
            Err(ModelError::InvertedYearRange {
                start: 2011,
                end: 2008
            })
        );
    }

    #[test]
    fn brand_and_model_are_keyed_by_name() {
        let brand = Brand::new(1, "KTM");
        let model = Model::new(4, "250 SX");
        assert_eq!(brand.key(), "KTM");
        assert_eq!(model.key(), "250 SX");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn year_range_accepts_backend_field_spellings() {
        let lower: YearRange =
            serde_json::from_str(r#"{"startyear":2015,"endyear":9999}"#)
                .unwrap();
        let camel: YearRange =
            serde_json::from_str(r#"{"startYear":2015,"endYear":9999}"#)
                .unwrap();
        assert_eq!(lower, YearRange::open_ended(2015));
        assert_eq!(camel, lower);
    }
}
