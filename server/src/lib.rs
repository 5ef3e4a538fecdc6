use std::fs;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

pub mod color;
pub mod config;
pub mod names;
pub mod palette;
pub mod render;
pub mod web;

pub use color::{hex_to_rgb, rgb_to_hex, Color, ColorError, Hsv};
pub use names::{name_to_hex, nearest_color_name};
pub use palette::{generate_palette, Palette, PaletteError, PaletteGroup, PalettePosition};
pub use render::{PaletteRenderer, RenderError};

pub struct AppState {
    renderer: PaletteRenderer,
}

impl AppState {
    pub fn new(renderer: PaletteRenderer) -> Self {
        Self { renderer }
    }

    pub fn from_config(config: &config::Config) -> Self {
        Self::new(PaletteRenderer::new(&config.output_dir))
    }

    pub fn renderer(&self) -> &PaletteRenderer {
        &self.renderer
    }
}

pub async fn run(config: config::Config) -> anyhow::Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            config.output_dir.display()
        )
    })?;

    let state = Arc::new(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(
        target: "huewheel::server",
        addr = %config.bind,
        output_dir = %config.output_dir.display(),
        "server listening"
    );

    axum::serve(listener, web::router(state))
        .await
        .context("server terminated")
}
