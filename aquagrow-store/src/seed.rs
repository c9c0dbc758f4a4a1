//! Default dataset for an empty store.
//!
//! The seed ships inside the binary so first use never depends on a file
//! or network fetch. A seed file can still be supplied through
//! [`StoreConfig::seed_path`](crate::StoreConfig::seed_path); if it cannot
//! be used the embedded copy wins.

use std::path::Path;
use tracing::{error, warn};

use crate::model::Document;

const EMBEDDED_SEED: &str = include_str!("../seed/db.json");

/// Decode the embedded seed.
pub fn embedded_seed() -> Result<Document, serde_json::Error> {
    serde_json::from_str(EMBEDDED_SEED)
}

/// Resolve the seed document: the seed file if configured and readable,
/// else the embedded seed, else an empty document.
pub async fn resolve_seed(seed_path: Option<&Path>) -> Document {
    if let Some(path) = seed_path {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str::<Document>(&content) {
                Ok(doc) => return doc,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Seed file is malformed, using embedded seed")
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read seed file, using embedded seed")
            }
        }
    }

    match embedded_seed() {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "Embedded seed failed to decode, starting empty");
            Document::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_seed_decodes() {
        let doc = embedded_seed().unwrap();
        assert!(!doc.farmers.is_empty());
        assert!(!doc.investors.is_empty());
        assert!(!doc.team_members.is_empty());
        assert!(!doc.company_info.address.is_empty());
    }

    #[test]
    fn test_embedded_seed_ids_unique_and_prefixed() {
        let doc = embedded_seed().unwrap();

        let farmer_ids: HashSet<_> = doc.farmers.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(farmer_ids.len(), doc.farmers.len());
        assert!(doc.farmers.iter().all(|f| f.id.starts_with('F')));
        assert!(doc.investors.iter().all(|i| i.id.starts_with('I')));
        assert!(doc.team_members.iter().all(|t| t.id.starts_with('T')));
    }

    #[tokio::test]
    async fn test_missing_seed_file_falls_back() {
        let doc = resolve_seed(Some(Path::new("/nonexistent/aquagrow/db.json"))).await;
        assert_eq!(doc, embedded_seed().unwrap());
    }

    #[tokio::test]
    async fn test_seed_file_used_when_valid() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        let mut custom = Document::default();
        custom.company_info.email = "seed@example.com".to_string();
        std::fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let doc = resolve_seed(Some(&path)).await;
        assert_eq!(doc.company_info.email, "seed@example.com");
        assert!(doc.farmers.is_empty());
    }
}
