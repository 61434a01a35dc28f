//! Offline unit tests for anzeige-db pool configuration and row types.
//! These tests do not require a live database connection.

use anzeige_core::{AppConfig, Environment, Location};
use anzeige_db::{DbError, ImportSummary, LocationRow, PoolConfig};
use std::path::PathBuf;

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        log_level: "info".to_string(),
        catalog_path: PathBuf::from("./config/locations.yaml"),
        fallback_year: 2025,
        fuzzy_threshold: 0.6,
        stub_placeholder: "Unbekannt".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connecting_without_url_fails_before_io() {
    let err = anzeige_db::connect_pool_from_config(&app_config(None))
        .await
        .expect_err("missing url must fail");
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}

#[test]
fn location_row_converts_to_domain_location() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = LocationRow {
        id: 3,
        public_id: Uuid::new_v4(),
        name: "Stuttgart Mitte".to_string(),
        city: "Stuttgart".to_string(),
        state: "Baden-Württemberg".to_string(),
        postal_code: Some("70173".to_string()),
        address: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let location = Location::from(row);
    assert_eq!(location.id, 3);
    assert_eq!(location.name, "Stuttgart Mitte");
    assert_eq!(location.postal_code.as_deref(), Some("70173"));
    assert!(location.address.is_none());
}

#[test]
fn import_summary_starts_empty() {
    let summary = ImportSummary::default();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.skipped, 0);
}
