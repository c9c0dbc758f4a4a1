//! Site wiring: admin access, persistence across reopen, and isolation
//! between content generation and the record store.

use aquagrow_gateway::{GatewayError, MockBackend};
use aquagrow_site::{AuthError, LlmProvider, Site, SiteConfig};
use aquagrow_store::{FarmerStatus, MemoryStorage, NewFarmer, StoragePort};
use std::sync::Arc;

fn memory_site(backend: MockBackend) -> (Site, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let site = Site::from_parts(SiteConfig::default(), storage.clone(), Arc::new(backend));
    (site, storage)
}

#[tokio::test]
async fn test_failed_generation_leaves_records_untouched() {
    let (site, storage) = memory_site(MockBackend::default().failing("API key not valid"));
    let session = site.login("admin", "password").unwrap();
    let console = site.console();

    let before = console.farmers(&session).list().await.unwrap();
    let snapshot = storage.get("aquaGrowDb").await.unwrap();

    let collection = console.farmers(&session);
    let (faqs, farmers) = tokio::join!(site.gateway().faqs(), collection.list());

    assert!(matches!(faqs, Err(GatewayError::GenerationFailed { .. })));
    assert_eq!(farmers.unwrap(), before);
    assert_eq!(storage.get("aquaGrowDb").await.unwrap(), snapshot);
}

#[tokio::test]
async fn test_wrong_credentials_never_reach_console() {
    let (site, _) = memory_site(MockBackend::default());

    assert_eq!(
        site.login("admin", "letmein").unwrap_err(),
        AuthError::InvalidCredentials
    );
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SiteConfig::default();
    config.data_dir = dir.path().to_path_buf();
    config.llm.provider = LlmProvider::Mock;

    let created = {
        let site = Site::open(config.clone()).unwrap();
        let session = site.login("admin", "password").unwrap();
        let farmer = site
            .console()
            .farmers(&session)
            .create(NewFarmer {
                name: "Amina Hassan".to_string(),
                location: "Kitui County".to_string(),
                phone: Some("+254 711 000 111".to_string()),
                status: FarmerStatus::Pending,
            })
            .await
            .unwrap();
        site.logout(session);
        farmer
    };

    let (gate, console) = Site::open_admin(&config).unwrap();
    let session = gate.login("admin", "password").unwrap();
    let farmers = console.farmers(&session).list().await.unwrap();

    assert_eq!(farmers.len(), 4);
    assert_eq!(farmers[0], created);
    assert!(created.id.starts_with('F'));
}

#[tokio::test]
async fn test_functions_server_uses_configured_port() {
    let mut config = SiteConfig::default();
    config.http_port = 9123;
    let site = Site::from_parts(
        config,
        Arc::new(MemoryStorage::new()),
        Arc::new(MockBackend::default()),
    );

    assert_eq!(site.functions_server().bind_addr().port(), 9123);
}
