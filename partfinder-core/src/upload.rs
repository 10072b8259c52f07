use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};

/// A product CSV to import under a new root category.
///
/// Only the file extension is checked here; row parsing happens on the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    path: PathBuf,
    category: String,
}

impl UploadRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        category: impl Into<String>,
    ) -> CatalogResult<Self> {
        let path = path.into();
        let category = category.into().trim().to_string();

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(CatalogError::InvalidUpload(format!(
                "{} is not a .csv file",
                path.display()
            )));
        }
        if category.is_empty() {
            return Err(CatalogError::InvalidUpload(
                "a root category name is required".to_string(),
            ));
        }

        Ok(Self { path, category })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the root category the rows are filed under.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_csv_in_any_case() {
        let request = UploadRequest::new("/tmp/KTM.CSV", " Suspension ").unwrap();
        assert_eq!(request.category(), "Suspension");
        assert_eq!(request.file_name(), "KTM.CSV");
    }

    #[test]
    fn rejects_other_extensions() {
        for path in ["parts.xlsx", "parts", "parts.csv.bak"] {
            assert!(
                matches!(
                    UploadRequest::new(path, "Brakes"),
                    Err(CatalogError::InvalidUpload(_))
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_category() {
        assert!(matches!(
            UploadRequest::new("parts.csv", "   "),
            Err(CatalogError::InvalidUpload(_))
        ));
    }
}
