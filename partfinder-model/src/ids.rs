use std::fmt;

/// Strongly typed ID for motorcycle brands
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BrandID(pub i32);

impl BrandID {
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for BrandID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for brand models
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ModelID(pub i32);

impl ModelID {
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ModelID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for product categories.
///
/// Unlike brands and models, categories are addressed by ID on the wire
/// (`category_id=`), so this is also the category's facet key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CategoryID(pub i32);

impl CategoryID {
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CategoryID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Article code of a product (e.g. `KT12345`).
///
/// Older backend revisions serialized this as an integer, so deserialization
/// accepts both a JSON string and a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ProductID(pub String);

impl ProductID {
    pub fn new(code: impl Into<String>) -> Self {
        ProductID(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProductID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProductID {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ProductIDVisitor;

        impl serde::de::Visitor<'_> for ProductIDVisitor {
            type Value = ProductID;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a product code string or integer")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<ProductID, E> {
                Ok(ProductID(v.to_owned()))
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> Result<ProductID, E> {
                Ok(ProductID(v))
            }

            fn visit_i64<E: serde::de::Error>(
                self,
                v: i64,
            ) -> Result<ProductID, E> {
                Ok(ProductID(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(
                self,
                v: u64,
            ) -> Result<ProductID, E> {
                Ok(ProductID(v.to_string()))
            }
        }

        deserializer.deserialize_any(ProductIDVisitor)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn product_id_accepts_strings_and_integers() {
        let from_str: ProductID = serde_json::from_str("\"KT1234\"").unwrap();
        let from_int: ProductID = serde_json::from_str("1234").unwrap();

        assert_eq!(from_str.as_str(), "KT1234");
        assert_eq!(from_int.as_str(), "1234");
    }

    #[test]
    fn numeric_ids_are_transparent() {
        let id: CategoryID = serde_json::from_str("7").unwrap();
        assert_eq!(id, CategoryID(7));
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
