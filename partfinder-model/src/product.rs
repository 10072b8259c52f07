use crate::ids::{CategoryID, ProductID};

/// A catalog product as returned by the product search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub id: ProductID,
    pub name: String,
    pub category_id: CategoryID,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    /// Brand the part is sold for, as free text from the import.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub brand: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_universal: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub importer_name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub motorcycles: Vec<Fitment>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_id: CategoryID,
    ) -> Self {
        Self {
            id: ProductID::new(id),
            name: name.into(),
            category_id,
            description: None,
            brand: None,
            is_universal: false,
            importer_name: None,
            motorcycles: Vec::new(),
        }
    }

    /// Human readable "fits" column: `Universal` or a comma separated list
    /// of fitments.
    pub fn fits_summary(&self) -> String {
        if self.is_universal {
            return "Universal".to_string();
        }
        self.motorcycles
            .iter()
            .map(Fitment::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A motorcycle a product is compatible with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fitment {
    pub brand: String,
    pub model: String,
    pub start_year: u16,
    pub end_year: u16,
}

impl std::fmt::Display for Fitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.end_year == crate::vehicle::OPEN_END_YEAR {
            write!(f, "{} {} {}–", self.brand, self.model, self.start_year)
        } else {
            write!(
                f,
                "{} {} {}–{}",
                self.brand, self.model, self.start_year, self.end_year
            )
        }
    }
}
