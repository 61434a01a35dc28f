use anzeige_core::{Location, NewLocation};

use crate::error::ResolveError;
use crate::resolver::{find_by_fuzzy_name, normalized_name, FuzzyMatch, ResolverConfig};

/// Storage the resolver reads and writes through.
///
/// Implementations must return entries from [`list_locations`] in a stable
/// order; fuzzy ties resolve to the earliest entry.
///
/// [`list_locations`]: LocationCatalog::list_locations
pub trait LocationCatalog {
    type Error: From<ResolveError>;

    /// Every entry, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the catalog cannot be read.
    fn list_locations(&self) -> Result<Vec<Location>, Self::Error>;

    /// # Errors
    ///
    /// Returns the backend's error if the catalog cannot be read.
    fn get_location(&self, id: i64) -> Result<Option<Location>, Self::Error>;

    /// First entry whose name matches `name` ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the catalog cannot be read.
    fn get_location_by_name(&self, name: &str) -> Result<Option<Location>, Self::Error>;

    /// # Errors
    ///
    /// Returns the backend's error if the entry cannot be stored.
    fn create_location(&mut self, new: &NewLocation) -> Result<Location, Self::Error>;
}

/// Which resolution path produced a [`Resolved`] location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolveOutcome {
    Exact,
    Fuzzy { score: f64 },
    Created,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub location: Location,
    pub outcome: ResolveOutcome,
}

impl Resolved {
    #[must_use]
    pub fn was_created(&self) -> bool {
        self.outcome == ResolveOutcome::Created
    }
}

/// Resolves `name` against `catalog`, creating a stub entry when neither an
/// exact nor a fuzzy match exists.
///
/// Calling this twice with the same unmatched name creates one stub: the
/// second call finds it by exact name.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArgument`] (converted into the catalog's
/// error) for a blank name or an out-of-range threshold, and any error the
/// catalog raises. Nothing is created on error.
pub fn get_or_create<C: LocationCatalog>(
    catalog: &mut C,
    name: &str,
    config: &ResolverConfig,
) -> Result<Resolved, C::Error> {
    normalized_name(name)?;

    if let Some(location) = catalog.get_location_by_name(name)? {
        tracing::debug!(name, location_id = location.id, "exact location match");
        return Ok(Resolved {
            location,
            outcome: ResolveOutcome::Exact,
        });
    }

    let snapshot = catalog.list_locations()?;
    if let Some(FuzzyMatch { location, score }) =
        find_by_fuzzy_name(&snapshot, name, config.threshold)?
    {
        tracing::debug!(
            name,
            location_id = location.id,
            matched = %location.name,
            score,
            "fuzzy location match"
        );
        return Ok(Resolved {
            location: location.clone(),
            outcome: ResolveOutcome::Fuzzy { score },
        });
    }

    let location = catalog.create_location(&NewLocation::stub(name, &config.stub_placeholder))?;
    tracing::info!(
        name = %location.name,
        location_id = location.id,
        "created stub location"
    );
    Ok(Resolved {
        location,
        outcome: ResolveOutcome::Created,
    })
}

/// In-process catalog backed by a `Vec`. Identifiers are assigned
/// sequentially starting after the highest existing one.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    locations: Vec<Location>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locations(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Seeds the catalog from insert payloads, numbering them from 1.
    #[must_use]
    pub fn from_new_locations(entries: impl IntoIterator<Item = NewLocation>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn insert(&mut self, entry: NewLocation) -> Location {
        let next_id = self.locations.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        let location = entry.into_location(next_id);
        self.locations.push(location.clone());
        location
    }
}

impl LocationCatalog for MemoryCatalog {
    type Error = ResolveError;

    fn list_locations(&self) -> Result<Vec<Location>, Self::Error> {
        Ok(self.locations.clone())
    }

    fn get_location(&self, id: i64) -> Result<Option<Location>, Self::Error> {
        Ok(self.locations.iter().find(|l| l.id == id).cloned())
    }

    fn get_location_by_name(&self, name: &str) -> Result<Option<Location>, Self::Error> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .locations
            .iter()
            .find(|l| l.name.trim().to_lowercase() == wanted)
            .cloned())
    }

    fn create_location(&mut self, new: &NewLocation) -> Result<Location, Self::Error> {
        Ok(self.insert(new.clone()))
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
