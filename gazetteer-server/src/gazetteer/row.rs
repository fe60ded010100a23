//! Reference table rows.

use super::dms::Dms;

/// A cell in the external forecast grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

/// One named place from the reference table.
///
/// `level2` is `None` for level-1-only entries, such as a metropolitan city
/// listed without a district.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub level1: String,
    pub level2: Option<String>,
    pub grid: GridPoint,
    pub lat: Dms,
    pub lon: Dms,
}

impl ReferenceRow {
    /// The place name shown to users: level1, then level2 if present.
    pub fn display_name(&self) -> String {
        match &self.level2 {
            Some(level2) => format!("{} {}", self.level1, level2),
            None => self.level1.clone(),
        }
    }

    /// Latitude in decimal degrees.
    pub fn lat_decimal(&self) -> f64 {
        self.lat.to_decimal()
    }

    /// Longitude in decimal degrees.
    pub fn lon_decimal(&self) -> f64 {
        self.lon.to_decimal()
    }

    /// The dedup key: (level1, level2).
    pub(crate) fn key(&self) -> (&str, Option<&str>) {
        (self.level1.as_str(), self.level2.as_deref())
    }

    /// Whether level1 contains `needle`, which must already be lower case.
    pub(crate) fn level1_contains(&self, needle: &str) -> bool {
        contains_folded(&self.level1, needle)
    }

    /// Whether level2 contains `needle`, which must already be lower case.
    ///
    /// An absent level2 never matches.
    pub(crate) fn level2_contains(&self, needle: &str) -> bool {
        self.level2
            .as_deref()
            .is_some_and(|level2| contains_folded(level2, needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level1: &str, level2: Option<&str>) -> ReferenceRow {
        ReferenceRow {
            level1: level1.to_string(),
            level2: level2.map(str::to_string),
            grid: GridPoint { x: 60, y: 127 },
            lat: Dms::new(37.0, 33.0, 0.0),
            lon: Dms::new(126.0, 58.0, 0.0),
        }
    }

    #[test]
    fn display_name_joins_levels() {
        assert_eq!(row("청주시", Some("서원구")).display_name(), "청주시 서원구");
    }

    #[test]
    fn display_name_without_level2() {
        assert_eq!(row("세종특별자치시", None).display_name(), "세종특별자치시");
    }

    #[test]
    fn matching_ignores_case() {
        let r = row("Seoul", Some("Jongno-gu"));
        assert!(r.level1_contains("seo"));
        assert!(r.level2_contains("jongno"));
        assert!(!r.level1_contains("busan"));
    }

    #[test]
    fn absent_level2_never_matches() {
        let r = row("Sejong", None);
        assert!(!r.level2_contains(""));
        assert!(!r.level2_contains("sejong"));
    }

    #[test]
    fn keys_distinguish_absent_level2() {
        let city = row("Seoul", None);
        let district = row("Seoul", Some("Jongno-gu"));
        assert_ne!(city.key(), district.key());
    }
}
