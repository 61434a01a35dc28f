//! `extract` and `intake` command handlers.
//!
//! Extraction never fails on content: whatever could not be read from the
//! notification is left empty and reported as such. `intake` additionally
//! resolves the extracted location name and prints the incident draft.
//!
//! The extractor scans for the names of whichever catalog the location is
//! resolved against: the stored locations for `intake`, the catalog file for
//! `intake --offline` and `extract`.

use std::path::Path;

use anzeige_core::{
    load_location_catalog, AppConfig, ExtractionResult, IncidentDraft, Location, LocationsFile,
};
use anzeige_extract::{ContentExtractor, ExtractorConfig, DEFAULT_KNOWN_LOCATIONS};
use anzeige_resolver::{get_or_create, MemoryCatalog, ResolveOutcome, Resolved, ResolverConfig};

/// The configured catalog file, or `None` when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or validated.
pub(crate) fn load_catalog_file(config: &AppConfig) -> anyhow::Result<Option<LocationsFile>> {
    if !config.catalog_path.exists() {
        return Ok(None);
    }
    Ok(Some(load_location_catalog(&config.catalog_path)?))
}

/// Build the extractor, scanning for `known_locations` or the built-in
/// defaults when there are none.
pub(crate) fn build_extractor(
    config: &AppConfig,
    known_locations: Option<Vec<String>>,
) -> ContentExtractor {
    let known_locations = known_locations.unwrap_or_else(|| {
        tracing::warn!(
            path = %config.catalog_path.display(),
            "location catalog not found; using built-in location names"
        );
        DEFAULT_KNOWN_LOCATIONS
            .iter()
            .map(ToString::to_string)
            .collect()
    });
    ContentExtractor::new(ExtractorConfig::from_app_config(config, known_locations))
}

/// Names to scan for when resolving against the database. An empty table
/// falls back to the catalog file.
pub(crate) fn stored_location_names(
    stored: &[Location],
    config: &AppConfig,
) -> anyhow::Result<Option<Vec<String>>> {
    if stored.is_empty() {
        tracing::warn!("no stored locations; run `locations import` to seed the catalog");
        return Ok(load_catalog_file(config)?.as_ref().map(LocationsFile::names));
    }
    Ok(Some(stored.iter().map(|l| l.name.clone()).collect()))
}

fn read_notification(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the extraction result for `file` as JSON.
///
/// # Errors
///
/// Returns an error if the file or the catalog cannot be read.
pub(crate) fn run_extract(config: &AppConfig, file: &Path) -> anyhow::Result<()> {
    let names = load_catalog_file(config)?.as_ref().map(LocationsFile::names);
    let result = build_extractor(config, names).parse_email_content(&read_notification(file)?);
    if result.is_empty() {
        tracing::warn!(file = %file.display(), "nothing recognizable in notification");
    }
    print_json(&result)
}

/// Extract `file`, resolve its location and print the [`IncidentDraft`].
///
/// Without `offline` the location is resolved with get-or-create against the
/// database. With `offline` it is resolved against an in-memory copy of the
/// catalog file, so stubs created here are not persisted.
///
/// # Errors
///
/// Returns an error if the file or catalog cannot be read, or the database
/// is unavailable. A notification with no recognizable location is not an
/// error: the partial extraction is printed for manual completion.
pub(crate) async fn run_intake(
    config: &AppConfig,
    file: &Path,
    offline: bool,
) -> anyhow::Result<()> {
    let notification = read_notification(file)?;
    let resolver_config = ResolverConfig::from_app_config(config);

    if offline {
        let catalog = load_catalog_file(config)?.ok_or_else(|| {
            anyhow::anyhow!(
                "offline intake needs the location catalog at {}",
                config.catalog_path.display()
            )
        })?;
        let extraction =
            build_extractor(config, Some(catalog.names())).parse_email_content(&notification);
        let Some(name) = extraction.location_name() else {
            return print_partial(&extraction, file);
        };
        let mut memory = MemoryCatalog::from_new_locations(catalog.locations);
        let resolved = get_or_create(&mut memory, name, &resolver_config)?;
        return print_draft(config, &extraction, &resolved);
    }

    let pool = crate::db::connect(config).await?;
    let stored: Vec<Location> = anzeige_db::list_all_locations(&pool)
        .await?
        .into_iter()
        .map(Location::from)
        .collect();
    let names = stored_location_names(&stored, config)?;
    let extraction = build_extractor(config, names).parse_email_content(&notification);
    let Some(name) = extraction.location_name() else {
        return print_partial(&extraction, file);
    };
    let resolved = anzeige_db::get_or_create_location(&pool, name, &resolver_config).await?;
    print_draft(config, &extraction, &resolved)
}

fn print_partial(extraction: &ExtractionResult, file: &Path) -> anyhow::Result<()> {
    tracing::warn!(
        file = %file.display(),
        nothing_extracted = extraction.is_empty(),
        "no location found in notification; draft needs manual completion"
    );
    print_json(extraction)
}

fn print_draft(
    config: &AppConfig,
    extraction: &ExtractionResult,
    resolved: &Resolved,
) -> anyhow::Result<()> {
    log_resolution(extraction, resolved);
    if !resolved.was_created() && resolved.location.is_stub(&config.stub_placeholder) {
        tracing::warn!(
            location_id = resolved.location.id,
            "matched a stub location that still needs review"
        );
    }
    print_json(&IncidentDraft::from_extraction(extraction, &resolved.location))
}

fn log_resolution(extraction: &ExtractionResult, resolved: &Resolved) {
    let extracted = extraction.location_name().unwrap_or_default();
    match resolved.outcome {
        ResolveOutcome::Exact => tracing::info!(
            extracted,
            location_id = resolved.location.id,
            "location resolved exactly"
        ),
        ResolveOutcome::Fuzzy { score } => tracing::info!(
            extracted,
            location_id = resolved.location.id,
            matched = %resolved.location.name,
            score,
            "location resolved fuzzily"
        ),
        ResolveOutcome::Created => tracing::warn!(
            extracted,
            location_id = resolved.location.id,
            "no catalog match; created stub location for review"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn config_with_catalog(path: PathBuf) -> AppConfig {
        AppConfig {
            database_url: None,
            env: anzeige_core::Environment::Test,
            log_level: "info".to_string(),
            catalog_path: path,
            fallback_year: 2026,
            fuzzy_threshold: 0.6,
            stub_placeholder: "Unbekannt".to_string(),
            db_max_connections: 1,
            db_min_connections: 1,
            db_acquire_timeout_secs: 1,
        }
    }

    fn shipped_catalog_config() -> AppConfig {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/locations.yaml");
        config_with_catalog(path)
    }

    fn stored(id: i64, name: &str, city: &str) -> Location {
        Location {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: city.to_string(),
            postal_code: None,
            address: None,
        }
    }

    #[test]
    fn missing_catalog_falls_back_to_built_in_names() {
        let config = config_with_catalog(PathBuf::from("/nonexistent/locations.yaml"));
        let names = load_catalog_file(&config).unwrap().as_ref().map(LocationsFile::names);
        assert!(names.is_none());

        let extractor = build_extractor(&config, names);
        assert_eq!(
            extractor.config().known_locations.len(),
            DEFAULT_KNOWN_LOCATIONS.len()
        );
        assert_eq!(extractor.config().fallback_year, 2026);
    }

    #[test]
    fn shipped_catalog_drives_extraction() {
        let config = shipped_catalog_config();
        let catalog = load_catalog_file(&config).unwrap().unwrap();

        let extractor = build_extractor(&config, Some(catalog.names()));
        let result = extractor.parse_email_content("Standort: Karlsruhe, 3. Stock");
        assert_eq!(result.location_name(), Some("Karlsruhe"));
    }

    #[test]
    fn stored_locations_outside_the_catalog_file_are_extracted() {
        let config = shipped_catalog_config();
        let rows = vec![
            stored(1, "Hessental", "Schwäbisch Hall"),
            stored(12, "Tauberbischofsheim", "Unbekannt"),
        ];

        let names = stored_location_names(&rows, &config).unwrap();
        assert_eq!(
            names.as_deref(),
            Some(&["Hessental".to_string(), "Tauberbischofsheim".to_string()][..])
        );

        let extractor = build_extractor(&config, names);
        let result = extractor.parse_email_content("Filiale Tauberbischofsheim, Kasse 2");
        assert_eq!(result.location_name(), Some("Tauberbischofsheim"));
        assert!(rows[1].is_stub(&config.stub_placeholder));
    }

    #[test]
    fn empty_location_table_scans_the_catalog_file() {
        let config = shipped_catalog_config();
        let names = stored_location_names(&[], &config).unwrap().unwrap();
        assert_eq!(names.first().map(String::as_str), Some("Hessental"));
        assert!(names.iter().any(|n| n == "Karlsruhe"));
    }

    #[test]
    fn empty_location_table_without_catalog_file_uses_defaults() {
        let config = config_with_catalog(PathBuf::from("/nonexistent/locations.yaml"));
        let names = stored_location_names(&[], &config).unwrap();
        assert!(names.is_none());
    }

    #[test]
    fn unreadable_notification_is_an_error() {
        assert!(read_notification(Path::new("/nonexistent/mail.txt")).is_err());
    }
}
