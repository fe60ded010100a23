//! The in-memory gazetteer index and its queries.

use std::collections::HashSet;

use super::error::ResolveError;
use super::row::{GridPoint, ReferenceRow};

/// The result of resolving a place name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub grid: GridPoint,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

/// Immutable index over the deduplicated reference rows.
///
/// Built once at startup and shared read-only between request handlers.
#[derive(Debug, Clone, Default)]
pub struct GazetteerIndex {
    rows: Vec<ReferenceRow>,
    regions: Vec<String>,
}

impl GazetteerIndex {
    /// Build an index from raw rows.
    ///
    /// Rows sharing a (level1, level2) key are collapsed to the first
    /// occurrence. Order is otherwise preserved.
    pub fn from_rows(raw: impl IntoIterator<Item = ReferenceRow>) -> Self {
        let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
        let mut rows = Vec::new();

        for row in raw {
            let (level1, level2) = row.key();
            if seen.insert((level1.to_string(), level2.map(str::to_string))) {
                rows.push(row);
            }
        }

        let mut seen_regions = HashSet::new();
        let regions = rows
            .iter()
            .filter(|r| seen_regions.insert(r.level1.as_str()))
            .map(|r| r.level1.clone())
            .collect();

        Self { rows, regions }
    }

    /// All rows, in load order.
    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// Unique level1 names in order of first appearance.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Number of rows in the index.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find display names whose level1 or level2 contains `query`.
    ///
    /// Matching is case-insensitive. Results are in index order with
    /// duplicates removed. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut seen = HashSet::new();

        self.rows
            .iter()
            .filter(|r| r.level1_contains(&needle) || r.level2_contains(&needle))
            .map(ReferenceRow::display_name)
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Find the row a place string names.
    ///
    /// One word matches against level1; two words match level1 and level2
    /// respectively. The first matching row in index order wins.
    pub fn find_by_name(&self, place: &str) -> Result<&ReferenceRow, ResolveError> {
        let tokens: Vec<String> = place.split_whitespace().map(str::to_lowercase).collect();

        let row = match tokens.as_slice() {
            [level1] => self.rows.iter().find(|r| r.level1_contains(level1)),
            [level1, level2] => self
                .rows
                .iter()
                .find(|r| r.level1_contains(level1) && r.level2_contains(level2)),
            _ => {
                return Err(ResolveError::InvalidQuery {
                    tokens: tokens.len(),
                });
            }
        };

        row.ok_or(ResolveError::NotFound)
    }

    /// Resolve a place string to grid and geodetic coordinates.
    pub fn resolve_by_name(&self, place: &str) -> Result<Location, ResolveError> {
        let row = self.find_by_name(place)?;
        Ok(Location {
            grid: row.grid,
            lat: row.lat_decimal(),
            lon: row.lon_decimal(),
        })
    }

    /// Resolve decimal coordinates back to a place name.
    ///
    /// Coordinates must equal a row's converted DMS values exactly; there is
    /// no distance tolerance.
    pub fn resolve_by_coordinates(&self, lat: f64, lon: f64) -> Result<String, ResolveError> {
        self.rows
            .iter()
            .find(|r| r.lat_decimal() == lat && r.lon_decimal() == lon)
            .map(ReferenceRow::display_name)
            .ok_or(ResolveError::NotFound)
    }
}
