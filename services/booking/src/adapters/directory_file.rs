//! services/booking/src/adapters/directory_file.rs
//!
//! Loads the provider directory from JSON, either a configured file or the list
//! bundled with the service.

use crate::error::AppError;
use clinic_booking_core::{Directory, Provider};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// The clinic's provider list shipped with the binary.
pub const BUNDLED_PROVIDERS: &str = include_str!("../../data/providers.json");

#[derive(Deserialize)]
struct ProviderRecord {
    name: String,
    specialty: String,
    location: String,
    fee: u32,
    #[serde(rename = "img")]
    image_url: String,
}
impl ProviderRecord {
    fn to_domain(self) -> Provider {
        Provider {
            name: self.name,
            specialty: self.specialty,
            location: self.location,
            fee: self.fee,
            image_url: self.image_url,
        }
    }
}

/// Parses a JSON array of providers and validates it as a directory.
pub fn parse_directory(json: &str) -> Result<Directory, AppError> {
    let records: Vec<ProviderRecord> = serde_json::from_str(json)?;
    let providers = records.into_iter().map(ProviderRecord::to_domain).collect();
    Ok(Directory::new(providers)?)
}

/// Reads the directory from `path`, or falls back to the bundled list.
pub async fn load_directory(path: Option<&Path>) -> Result<Directory, AppError> {
    let directory = match path {
        Some(path) => {
            info!("Loading provider directory from {}", path.display());
            let json = tokio::fs::read_to_string(path).await?;
            parse_directory(&json)?
        }
        None => parse_directory(BUNDLED_PROVIDERS)?,
    };
    info!(
        "Directory loaded: {} providers across {} specialties",
        directory.all().len(),
        directory.categories().len()
    );
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_booking_core::DirectoryError;

    #[test]
    fn bundled_directory_is_valid() {
        let directory = parse_directory(BUNDLED_PROVIDERS).unwrap();
        assert_eq!(directory.all().len(), 9);
        assert_eq!(
            directory.categories(),
            [
                "Cardiologist",
                "Dermatologist",
                "Neurologist",
                "Pediatrician",
                "Orthopedic",
                "Gynecologist"
            ]
        );
        let smith = directory.find("Dr. John Smith").unwrap();
        assert_eq!(smith.fee, 8000);
        assert!(smith.image_url.starts_with("https://"));
    }

    #[test]
    fn duplicate_names_fail_the_load() {
        let json = r#"[
            {"name": "Dr. A", "specialty": "X", "location": "L", "fee": 1, "img": "i"},
            {"name": "Dr. A", "specialty": "Y", "location": "L", "fee": 1, "img": "i"}
        ]"#;
        let err = parse_directory(json).unwrap_err();
        assert!(matches!(
            err,
            AppError::Directory(DirectoryError::DuplicateProvider(name)) if name == "Dr. A"
        ));
    }

    #[test]
    fn negative_fee_is_a_json_error() {
        let json = r#"[{"name": "Dr. A", "specialty": "X", "location": "L", "fee": -5, "img": "i"}]"#;
        assert!(matches!(parse_directory(json), Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn reads_a_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.json");
        std::fs::write(
            &path,
            r#"[{"name": "Dr. Solo", "specialty": "Pediatrician", "location": "Kano", "fee": 5000, "img": "x"}]"#,
        )
        .unwrap();

        let directory = load_directory(Some(&path)).await.unwrap();
        assert_eq!(directory.all().len(), 1);
        assert_eq!(directory.search("solo", "").len(), 1);
    }
}
