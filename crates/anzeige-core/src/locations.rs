use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// City/state value written into locations created on a resolver miss.
pub const DEFAULT_STUB_PLACEHOLDER: &str = "Unbekannt";

/// A catalog entry as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub address: Option<String>,
}

impl Location {
    /// `true` when this entry was created as a placeholder for an unmatched name.
    #[must_use]
    pub fn is_stub(&self, placeholder: &str) -> bool {
        self.city == placeholder
            && self.state == placeholder
            && self.postal_code.is_none()
            && self.address.is_none()
    }
}

/// Insert payload for a catalog entry, also the shape of one entry in the
/// catalog YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewLocation {
    /// Placeholder entry for a name no catalog row matched.
    #[must_use]
    pub fn stub(name: &str, placeholder: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            city: placeholder.to_string(),
            state: placeholder.to_string(),
            postal_code: None,
            address: None,
        }
    }

    /// Attach an identifier, producing the stored form.
    #[must_use]
    pub fn into_location(self, id: i64) -> Location {
        Location {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            address: self.address,
        }
    }
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
}

impl LocationUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.address.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationsFile {
    pub locations: Vec<NewLocation>,
}

impl LocationsFile {
    /// Catalog names in file order, the list the extractor scans.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }
}

/// Load and validate the location catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_location_catalog(path: &Path) -> Result<LocationsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_location_catalog(&content)
}

fn parse_location_catalog(content: &str) -> Result<LocationsFile, ConfigError> {
    let file: LocationsFile =
        serde_yaml::from_str(content).map_err(ConfigError::CatalogFileParse)?;

    validate_locations(&file)?;

    Ok(file)
}

fn validate_locations(file: &LocationsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for location in &file.locations {
        if location.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location name must be non-empty".to_string(),
            ));
        }

        if location.city.trim().is_empty() || location.state.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' must have a city and a state",
                location.name
            )));
        }

        if !seen_names.insert(location.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate location name: '{}'",
                location.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "locations_test.rs"]
mod tests;
