use std::ffi::OsStr;
use std::path::{Component, Path as FsPath};
use std::sync::Arc;

use askama::Template;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::color::{hex_to_rgb, Color};
use crate::names::nearest_color_name;
use crate::palette::{Palette, PalettePosition};
use crate::render::swatch_png;
use crate::AppState;

const FALLBACK_NAME: &str = "Custom Color";
const VIEW_ERROR: &str = "Error displaying color palette";
const PNG_CONTENT_TYPE: &str = "image/png";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/palettes/{filename}", get(serve_palette_image))
        .route("/palette/{colors}", get(show_palette))
        .route("/api/palette/{seed}", get(generate_palette))
        .route("/swatch/{hex}", get(serve_swatch))
        .with_state(state)
}

/// One row of the palette view: the color as supplied, its closest name and
/// the meaning of its slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub hex: String,
    pub name: String,
    pub description: &'static str,
    /// CSS background for the swatch; `transparent` when `hex` is unparseable.
    #[serde(skip)]
    pub swatch: String,
}

impl PaletteEntry {
    pub fn new(hex: &str, description: &'static str) -> Self {
        let swatch = hex_to_rgb(hex)
            .map(|color| color.to_hex())
            .unwrap_or_else(|_| "transparent".to_string());
        Self {
            hex: hex.to_string(),
            name: nearest_color_name(hex).unwrap_or(FALLBACK_NAME).to_string(),
            description,
            swatch,
        }
    }
}

/// Pairs comma separated colors with slot descriptions. Extra colors or
/// descriptions beyond the shorter list are dropped.
pub fn palette_entries(colors: &str) -> Vec<PaletteEntry> {
    colors
        .split(',')
        .map(str::trim)
        .zip(PalettePosition::ALL)
        .map(|(hex, position)| PaletteEntry::new(hex, position.description()))
        .collect()
}

#[derive(Template)]
#[template(path = "palette.html")]
struct PaletteView<'a> {
    entries: &'a [PaletteEntry],
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorView<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GeneratedPalette {
    pub seed: String,
    pub colors: Vec<PaletteEntry>,
    pub image: String,
    pub view: String,
}

#[derive(Debug, Serialize)]
struct ApiError<'a> {
    error: &'a str,
}

async fn serve_palette_image(
    State(state): State<Arc<AppState>>,
    filename: Result<Path<String>, PathRejection>,
) -> Response {
    let Ok(Path(filename)) = filename else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !is_plain_file_name(&filename) {
        debug!(%filename, "rejected palette file name");
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.renderer().output_dir().join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response(),
        Err(err) => {
            debug!(path = %path.display(), %err, "palette image unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn show_palette(colors: Result<Path<String>, PathRejection>) -> Response {
    let colors = match colors {
        Ok(Path(colors)) => colors,
        Err(err) => {
            error!(?err, "failed to read palette colors from path");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, VIEW_ERROR);
        }
    };

    let entries = palette_entries(&colors);
    match (PaletteView { entries: &entries }).render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(?err, "failed to render palette view");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, VIEW_ERROR)
        }
    }
}

async fn generate_palette(
    State(state): State<Arc<AppState>>,
    seed: Result<Path<String>, PathRejection>,
) -> Response {
    let Ok(Path(seed)) = seed else {
        return json_error(StatusCode::BAD_REQUEST, "invalid seed");
    };

    let palette = match Palette::from_seed(&seed) {
        Ok(palette) => palette,
        Err(err) => {
            info!(%seed, %err, "rejected palette seed");
            return json_error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string());
        }
    };

    let render_state = Arc::clone(&state);
    let rendered =
        tokio::task::spawn_blocking(move || render_state.renderer().render_palette(&palette))
            .await;
    let path = match rendered {
        Ok(Ok(path)) => path,
        Ok(Err(err)) => {
            error!(?err, %seed, "failed to render palette image");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render palette");
        }
        Err(err) => {
            error!(?err, %seed, "palette render task failed");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render palette");
        }
    };

    let Some(filename) = path.file_name().and_then(OsStr::to_str) else {
        error!(path = %path.display(), "rendered palette has no file name");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render palette");
    };

    let colors: Vec<PaletteEntry> = palette
        .iter()
        .map(|(position, color)| PaletteEntry::new(&color.to_hex(), position.description()))
        .collect();
    let view = palette
        .to_hex_strings()
        .iter()
        .map(|hex| hex.replacen('#', "%23", 1))
        .collect::<Vec<_>>()
        .join(",");

    info!(%seed, image = %filename, "generated palette");
    Json(GeneratedPalette {
        seed,
        colors,
        image: format!("/palettes/{filename}"),
        view: format!("/palette/{view}"),
    })
    .into_response()
}

async fn serve_swatch(hex: Result<Path<String>, PathRejection>) -> Response {
    let Ok(Path(hex)) = hex else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let color = match hex.parse::<Color>() {
        Ok(color) => color,
        Err(err) => {
            debug!(%hex, %err, "rejected swatch color");
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };

    match swatch_png(color) {
        Ok(bytes) => ([(header::CONTENT_TYPE, PNG_CONTENT_TYPE)], bytes).into_response(),
        Err(err) => {
            error!(?err, %hex, "failed to encode swatch");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    match (ErrorView { message }).render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(?err, "failed to render error view");
            (status, message.to_string()).into_response()
        }
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiError { error: message })).into_response()
}

/// A single normal path component, so lookups stay inside the output
/// directory.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = FsPath::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == OsStr::new(name)
    ) && !name.contains(['/', '\\'])
}

fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => PNG_CONTENT_TYPE,
        _ => "application/octet-stream",
    }
}
