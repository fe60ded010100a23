//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::comments::CommentError;
use crate::gazetteer::ResolveError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<std::path::Path>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/main.html", get(home_page))
        .route("/health", get(health))
        .route("/comments/:region", get(region_page))
        .route("/comments/:region/add", post(add_comment))
        .route("/location_search", get(location_search_page))
        .route("/location_search.html", get(location_search_page))
        .route("/search", get(search_places))
        .route("/coordinates", get(coordinates))
        .route("/place", get(place_by_coordinates))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Landing page for the default region.
async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let home = state.home.clone();
    render_region(
        &state,
        &home.place,
        Some(home.lat),
        Some(home.lon),
        Some(home.place.as_str()),
    )
    .await
}

/// Comment page for a region.
async fn region_page(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Query(query): Query<CommentPageQuery>,
) -> Result<Html<String>, AppError> {
    render_region(
        &state,
        &region,
        query.lat,
        query.lon,
        query.place.as_deref(),
    )
    .await
}

async fn render_region(
    state: &AppState,
    region: &str,
    lat: Option<f64>,
    lon: Option<f64>,
    place: Option<&str>,
) -> Result<Html<String>, AppError> {
    let comments = state.comments.list_by_region(region).await;

    let template = MainTemplate {
        region: region.to_string(),
        regions: RegionLink::for_regions(state.gazetteer.regions(), region),
        comments: comments.iter().map(CommentView::from_comment).collect(),
        place: place.unwrap_or_default().to_string(),
        lat: format_coordinate(lat),
        lon: format_coordinate(lon),
        post_url: comment_post_url(region, lat, lon),
    };
    render(&template)
}

/// Add a comment, then send the browser back to the region page.
async fn add_comment(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Query(query): Query<CommentPostQuery>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    state
        .comments
        .add(&region, &form.name, &form.comment)
        .await?;

    Ok(Redirect::to(&comments_url(
        &region,
        query.lat,
        query.lon,
        Some(region.as_str()),
    )))
}

/// Location search page.
async fn location_search_page() -> Result<Html<String>, AppError> {
    render(&LocationSearchTemplate)
}

/// Search place names by substring.
async fn search_places(
    State(state): State<AppState>,
    req: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(req) = req?;
    let places = state.gazetteer.search(&req.query);
    Ok(Json(SearchResponse { places }))
}

/// Resolve a place name to coordinates, or coordinates to a place name.
async fn coordinates(
    State(state): State<AppState>,
    req: Result<Query<CoordinatesRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = req?;
    if let Some(place) = req.place.as_deref().filter(|p| !p.is_empty()) {
        let location = state.gazetteer.resolve_by_name(place)?;
        return Ok(Json(CoordinatesResponse::from(location)).into_response());
    }

    match (req.lat, req.lon) {
        (Some(lat), Some(lon)) => Ok(Json(reverse(&state, lat, lon)?).into_response()),
        _ => Err(AppError::BadRequest {
            message: "Either 'place' or both 'lat' and 'lon' must be provided".to_string(),
        }),
    }
}

/// Resolve coordinates to a place name.
async fn place_by_coordinates(
    State(state): State<AppState>,
    req: Result<Query<ReverseRequest>, QueryRejection>,
) -> Result<Json<PlaceResponse>, AppError> {
    let Query(req) = req?;
    Ok(Json(reverse(&state, req.lat, req.lon)?))
}

fn reverse(state: &AppState, lat: f64, lon: f64) -> Result<PlaceResponse, ResolveError> {
    let place = state.gazetteer.resolve_by_coordinates(lat, lon)?;
    Ok(PlaceResponse { place })
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidQuery { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            ResolveError::NotFound => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<CommentError> for AppError {
    fn from(e: CommentError) -> Self {
        match e {
            CommentError::Validation { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            CommentError::Persist { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
