//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::gazetteer::Location;

/// Request to search place names.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Substring to look for in level1 or level2 names
    pub query: String,
}

/// Response for place name search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching display names, in table order
    pub places: Vec<String>,
}

/// Request to resolve a place or a coordinate pair.
///
/// `place` takes precedence when both are supplied.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinatesRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub place: Option<String>,
}

/// Request to resolve a coordinate pair to a place.
#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    pub lat: f64,
    pub lon: f64,
}

/// Geodetic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Forecast grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResult {
    pub x: i32,
    pub y: i32,
}

/// Response for forward resolution.
#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinatesResponse {
    pub coordinates: LatLon,
    pub grid: GridResult,
}

impl From<Location> for CoordinatesResponse {
    fn from(location: Location) -> Self {
        Self {
            coordinates: LatLon {
                lat: location.lat,
                lon: location.lon,
            },
            grid: GridResult {
                x: location.grid.x,
                y: location.grid.y,
            },
        }
    }
}

/// Response for reverse resolution.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub place: String,
}

/// Optional location context carried on comment pages.
#[derive(Debug, Default, Deserialize)]
pub struct CommentPageQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub place: Option<String>,
}

/// Location context carried through a comment post.
#[derive(Debug, Default, Deserialize)]
pub struct CommentPostQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Comment form body.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub name: String,
    pub comment: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::GridPoint;

    #[test]
    fn coordinates_response_shape() {
        let response = CoordinatesResponse::from(Location {
            grid: GridPoint { x: 65, y: 91 },
            lat: 36.5,
            lon: 127.25,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "coordinates": { "lat": 36.5, "lon": 127.25 },
                "grid": { "x": 65, "y": 91 }
            })
        );
    }

    #[test]
    fn search_response_shape() {
        let response = SearchResponse {
            places: vec!["청주시 서원구".into()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"places":["청주시 서원구"]}"#);
    }
}
