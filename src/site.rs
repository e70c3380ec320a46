// ABOUTME: Public media page showing every press release, coverage link, image and video
// ABOUTME: Read-only; no session required

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::response::{AppResult, HtmlTemplate};
use crate::server::AppState;
use crate::store::{GalleryImage, MediaCoverage, PressRelease, Video};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub press_releases: Vec<PressRelease>,
    pub media_coverage: Vec<MediaCoverage>,
    pub images: Vec<GalleryImage>,
    pub videos: Vec<Video>,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let library = state.store.library()?;
    Ok(HtmlTemplate(IndexTemplate {
        press_releases: library.press_releases,
        media_coverage: library.media_coverage,
        images: library.images,
        videos: library.videos,
    })
    .into_response())
}
