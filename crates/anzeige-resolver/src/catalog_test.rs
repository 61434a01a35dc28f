use super::*;

fn seeded() -> MemoryCatalog {
    MemoryCatalog::from_new_locations([
        NewLocation {
            name: "Test Location".to_string(),
            city: "Stuttgart".to_string(),
            state: "Baden-Württemberg".to_string(),
            postal_code: Some("70173".to_string()),
            address: None,
        },
        NewLocation {
            name: "Hessental".to_string(),
            city: "Schwäbisch Hall".to_string(),
            state: "Baden-Württemberg".to_string(),
            postal_code: None,
            address: None,
        },
    ])
}

#[test]
fn seeding_numbers_entries_from_one() {
    let catalog = seeded();
    let ids: Vec<i64> = catalog.locations().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(catalog.len(), 2);
    assert!(!catalog.is_empty());
    assert!(MemoryCatalog::new().is_empty());
}

#[test]
fn ids_continue_after_highest_existing() {
    let mut catalog = MemoryCatalog::with_locations(vec![
        NewLocation::stub("A", "Unbekannt").into_location(40),
        NewLocation::stub("B", "Unbekannt").into_location(7),
    ]);
    let created = catalog
        .create_location(&NewLocation::stub("C", "Unbekannt"))
        .unwrap();
    assert_eq!(created.id, 41);
}

#[test]
fn lookups_by_id_and_name() {
    let catalog = seeded();
    assert_eq!(
        catalog.get_location(2).unwrap().map(|l| l.name),
        Some("Hessental".to_string())
    );
    assert!(catalog.get_location(99).unwrap().is_none());
    assert_eq!(
        catalog
            .get_location_by_name(" HESSENTAL ")
            .unwrap()
            .map(|l| l.id),
        Some(2)
    );
}

#[test]
fn exact_name_resolves_without_creating() {
    let mut catalog = seeded();
    let resolved = get_or_create(&mut catalog, "hessental", &ResolverConfig::default()).unwrap();
    assert_eq!(resolved.outcome, ResolveOutcome::Exact);
    assert_eq!(resolved.location.id, 2);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn fuzzy_name_resolves_without_creating() {
    let mut catalog = seeded();
    let resolved = get_or_create(&mut catalog, "TestLocation", &ResolverConfig::default()).unwrap();
    assert_eq!(resolved.location.id, 1);
    assert!(matches!(resolved.outcome, ResolveOutcome::Fuzzy { score } if score > 0.9));
    assert!(!resolved.was_created());
    assert_eq!(catalog.len(), 2);
}

#[test]
fn unmatched_name_creates_stub() {
    let mut catalog = seeded();
    let config = ResolverConfig::default();
    let resolved = get_or_create(&mut catalog, "  Completely Different ", &config).unwrap();

    assert!(resolved.was_created());
    assert_eq!(resolved.location.id, 3);
    assert_eq!(resolved.location.name, "Completely Different");
    assert_eq!(resolved.location.city, "Unbekannt");
    assert_eq!(resolved.location.state, "Unbekannt");
    assert!(resolved.location.is_stub(&config.stub_placeholder));
    assert_eq!(catalog.len(), 3);
}

#[test]
fn repeated_miss_creates_one_stub() {
    let mut catalog = seeded();
    let config = ResolverConfig::default();
    let first = get_or_create(&mut catalog, "Completely Different", &config).unwrap();
    let second = get_or_create(&mut catalog, "completely different", &config).unwrap();

    assert_eq!(first.outcome, ResolveOutcome::Created);
    assert_eq!(second.outcome, ResolveOutcome::Exact);
    assert_eq!(first.location.id, second.location.id);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn stub_uses_configured_placeholder() {
    let mut catalog = MemoryCatalog::new();
    let config = ResolverConfig {
        stub_placeholder: "Unknown".to_string(),
        ..ResolverConfig::default()
    };
    let resolved = get_or_create(&mut catalog, "Neckarsulm", &config).unwrap();
    assert_eq!(resolved.location.city, "Unknown");
    assert_eq!(resolved.location.id, 1);
}

#[test]
fn blank_name_is_rejected_and_nothing_created() {
    let mut catalog = seeded();
    let result = get_or_create(&mut catalog, "   ", &ResolverConfig::default());
    assert!(matches!(result, Err(ResolveError::InvalidArgument(_))));
    assert_eq!(catalog.len(), 2);
}

#[test]
fn invalid_threshold_is_rejected_and_nothing_created() {
    let mut catalog = seeded();
    let config = ResolverConfig::default().with_threshold(2.0);
    let result = get_or_create(&mut catalog, "Neckarsulm", &config);
    assert!(matches!(result, Err(ResolveError::InvalidArgument(_))));
    assert_eq!(catalog.len(), 2);
}
