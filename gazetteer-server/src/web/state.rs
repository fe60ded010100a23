//! Application state for the web layer.

use std::sync::Arc;

use tracing::warn;

use crate::comments::CommentStore;
use crate::config::{DEFAULT_LAT, DEFAULT_LON};
use crate::gazetteer::GazetteerIndex;

/// The place shown on the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeRegion {
    pub place: String,
    pub lat: f64,
    pub lon: f64,
}

impl HomeRegion {
    /// Resolve `place` against the gazetteer.
    ///
    /// The matched row's display name becomes the region, so a partial name
    /// such as `서울` lands on the `서울특별시` board. Falls back to the
    /// built-in coordinates if the place is unknown.
    pub fn resolve(gazetteer: &GazetteerIndex, place: &str) -> Self {
        match gazetteer.find_by_name(place) {
            Ok(row) => Self {
                place: row.display_name(),
                lat: row.lat_decimal(),
                lon: row.lon_decimal(),
            },
            Err(e) => {
                warn!(place, error = %e, "default place not in gazetteer, using fixed coordinates");
                Self {
                    place: place.to_string(),
                    lat: DEFAULT_LAT,
                    lon: DEFAULT_LON,
                }
            }
        }
    }
}

/// Shared application state.
///
/// The gazetteer is immutable; only the comment store takes locks.
#[derive(Clone)]
pub struct AppState {
    /// Loaded reference table
    pub gazetteer: Arc<GazetteerIndex>,

    /// Region comment board
    pub comments: Arc<CommentStore>,

    /// Landing page region
    pub home: Arc<HomeRegion>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(gazetteer: GazetteerIndex, comments: CommentStore, home: HomeRegion) -> Self {
        Self {
            gazetteer: Arc::new(gazetteer),
            comments: Arc::new(comments),
            home: Arc::new(home),
        }
    }
}
