//! Askama templates for the web frontend.

use askama::Template;

use crate::comments::Comment;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Region page: location summary, comment board and region list.
#[derive(Template)]
#[template(path = "main.html")]
pub struct MainTemplate {
    pub region: String,
    pub regions: Vec<RegionLink>,
    pub comments: Vec<CommentView>,
    pub place: String,
    pub lat: String,
    pub lon: String,
    pub post_url: String,
}

/// Location search page.
#[derive(Template)]
#[template(path = "location_search.html")]
pub struct LocationSearchTemplate;

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Link to a region's comment page.
#[derive(Debug, Clone)]
pub struct RegionLink {
    pub name: String,
    pub href: String,
    pub is_current: bool,
}

impl RegionLink {
    /// Build links for every region, marking `current`.
    pub fn for_regions(regions: &[String], current: &str) -> Vec<Self> {
        regions
            .iter()
            .map(|name| RegionLink {
                name: name.clone(),
                href: comments_url(name, None, None, None),
                is_current: name == current,
            })
            .collect()
    }
}

/// Comment view model.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub name: String,
    pub text: String,
    pub posted_at: String,
}

impl CommentView {
    /// Create from a stored comment.
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            name: comment.name.clone(),
            text: comment.text.clone(),
            posted_at: comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Format an optional coordinate for display; missing values render empty.
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// URL of a region's comment page, with optional location context.
pub fn comments_url(region: &str, lat: Option<f64>, lon: Option<f64>, place: Option<&str>) -> String {
    let mut url = format!("/comments/{}", urlencoding::encode(region));
    let params = location_params(lat, lon, place);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params);
    }
    url
}

/// URL the comment form posts to.
pub fn comment_post_url(region: &str, lat: Option<f64>, lon: Option<f64>) -> String {
    let mut url = format!("/comments/{}/add", urlencoding::encode(region));
    let params = location_params(lat, lon, None);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params);
    }
    url
}

fn location_params(lat: Option<f64>, lon: Option<f64>, place: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(lat) = lat {
        params.push(format!("lat={lat}"));
    }
    if let Some(lon) = lon {
        params.push(format!("lon={lon}"));
    }
    if let Some(place) = place {
        params.push(format!("place={}", urlencoding::encode(place)));
    }
    params.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_url_encodes_region() {
        assert_eq!(
            comments_url("청주시 서원구", None, None, None),
            "/comments/%EC%B2%AD%EC%A3%BC%EC%8B%9C%20%EC%84%9C%EC%9B%90%EA%B5%AC"
        );
    }

    #[test]
    fn comments_url_with_location() {
        let url = comments_url("A B", Some(36.5), Some(127.25), Some("A B"));
        assert_eq!(url, "/comments/A%20B?lat=36.5&lon=127.25&place=A%20B");
    }

    #[test]
    fn comment_post_url_skips_missing_coordinates() {
        assert_eq!(comment_post_url("A", None, Some(1.5)), "/comments/A/add?lon=1.5");
        assert_eq!(comment_post_url("A", None, None), "/comments/A/add");
    }

    #[test]
    fn coordinates_keep_full_precision() {
        let lat = 36.0 + 38.0 / 60.0 + 33.0 / 3600.0;
        let shown = format_coordinate(Some(lat));
        assert_eq!(shown.parse::<f64>().unwrap(), lat);
        assert_eq!(format_coordinate(None), "");
    }

    #[test]
    fn region_links_mark_current() {
        let regions = vec!["서울특별시".to_string(), "청주시".to_string()];
        let links = RegionLink::for_regions(&regions, "청주시");

        assert!(!links[0].is_current);
        assert!(links[1].is_current);
        assert!(links[1].href.starts_with("/comments/"));
    }

    #[test]
    fn main_template_renders_comments() {
        let template = MainTemplate {
            region: "청주시 서원구".into(),
            regions: RegionLink::for_regions(&["청주시".to_string()], "청주시"),
            comments: vec![CommentView {
                name: "민수".into(),
                text: "<b>맑음".into(),
                posted_at: "2024-03-15 10:00".into(),
            }],
            place: "청주시 서원구".into(),
            lat: "36.6425".into(),
            lon: "127.48888888888888".into(),
            post_url: comment_post_url("청주시 서원구", None, None),
        };

        let html = template.render().unwrap();
        assert!(html.contains("민수"));
        assert!(html.contains("&lt;b&gt;맑음"));
        assert!(html.contains("data-lat=\"36.6425\""));
    }

    #[test]
    fn location_search_renders() {
        let html = LocationSearchTemplate.render().unwrap();
        assert!(html.contains("id=\"search-input\""));
    }
}
