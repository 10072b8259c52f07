use std::borrow::Cow;

use crate::facet::{FacetLevel, FacetOption};
use crate::ids::CategoryID;

/// Product category. Uploads create a root category per CSV and one
/// sub-category per distinct row label beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub path: Option<String>,
}

impl Category {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: CategoryID(id),
            name: name.into(),
            parent: None,
            path: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl FacetOption for Category {
    const LEVEL: FacetLevel = FacetLevel::Category;

    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
