// ABOUTME: Admin panel route handlers
// ABOUTME: Dashboard plus add/edit/delete for press releases, coverage links, images and videos

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::auth::{CurrentAdmin, DASHBOARD_PATH};
use super::flash::{self, Flash};
use super::templates::{DashboardTemplate, EditMediaTemplate, EditPressTemplate, EditVideoTemplate};
use crate::response::{AppResult, HtmlTemplate};
use crate::server::AppState;
use crate::uploads::{allowed_file, secure_filename};

/// Build the admin router mounted at /admin
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/press/add", post(press_add))
        .route("/press/edit/{id}", get(press_edit_view).post(press_edit_submit))
        .route("/press/delete/{id}", get(press_delete))
        .route("/media/add", post(media_add))
        .route("/media/edit/{id}", get(media_edit_view).post(media_edit_submit))
        .route("/media/delete/{id}", get(media_delete))
        .route("/image/add", post(image_add))
        .route("/image/delete/{id}", get(image_delete))
        .route("/video/add", post(video_add))
        .route("/video/edit/{id}", get(video_edit_view).post(video_edit_submit))
        .route("/video/delete/{id}", get(video_delete))
}

/// Queue a flash and send the browser back to the dashboard
async fn back_to_dashboard(session: &Session, flash: Flash) -> AppResult<Response> {
    flash::push(session, flash).await?;
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    session: Session,
) -> AppResult<Response> {
    let library = state.store.library()?;
    let flashes = flash::take(&session).await?;

    Ok(HtmlTemplate(DashboardTemplate {
        admin: admin.username,
        flashes,
        press_releases: library.press_releases,
        media_coverage: library.media_coverage,
        images: library.images,
        videos: library.videos,
    })
    .into_response())
}

// =============================================================================
// Press releases
// =============================================================================

#[derive(Deserialize)]
pub struct PressForm {
    pub title: String,
    pub date: String,
    pub description: String,
}

async fn press_add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PressForm>,
) -> AppResult<Response> {
    state
        .store
        .insert_press_release(&form.title, &form.description, &form.date)?;
    back_to_dashboard(&session, Flash::success("Press release added!")).await
}

async fn press_edit_view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let Some(item) = state.store.get_press_release(id)? else {
        return back_to_dashboard(&session, Flash::danger("Press release not found!")).await;
    };
    let flashes = flash::take(&session).await?;
    Ok(HtmlTemplate(EditPressTemplate { flashes, item }).into_response())
}

async fn press_edit_submit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<PressForm>,
) -> AppResult<Response> {
    state
        .store
        .update_press_release(id, &form.title, &form.description, &form.date)?;
    back_to_dashboard(&session, Flash::success("Press release updated!")).await
}

async fn press_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state.store.delete_press_release(id)?;
    back_to_dashboard(&session, Flash::success("Press release deleted!")).await
}

// =============================================================================
// Media coverage
// =============================================================================

#[derive(Deserialize)]
pub struct MediaForm {
    pub title: String,
    pub url: String,
}

async fn media_add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MediaForm>,
) -> AppResult<Response> {
    state.store.insert_media_coverage(&form.title, &form.url)?;
    back_to_dashboard(&session, Flash::success("Media coverage added!")).await
}

async fn media_edit_view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let Some(item) = state.store.get_media_coverage(id)? else {
        return back_to_dashboard(&session, Flash::danger("Media coverage not found!")).await;
    };
    let flashes = flash::take(&session).await?;
    Ok(HtmlTemplate(EditMediaTemplate { flashes, item }).into_response())
}

async fn media_edit_submit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<MediaForm>,
) -> AppResult<Response> {
    state.store.update_media_coverage(id, &form.title, &form.url)?;
    back_to_dashboard(&session, Flash::success("Media coverage updated!")).await
}

async fn media_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state.store.delete_media_coverage(id)?;
    back_to_dashboard(&session, Flash::success("Media coverage deleted!")).await
}

// =============================================================================
// Image gallery
// =============================================================================

/// A file part pulled out of the upload form
struct UploadedFile {
    file_name: String,
    data: axum::body::Bytes,
}

async fn image_add(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut upload: Option<UploadedFile> = None;
    let mut description = String::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                upload = Some(UploadedFile { file_name, data });
            }
            Some("description") => {
                description = field.text().await?;
            }
            _ => {}
        }
    }

    let Some(upload) = upload else {
        return back_to_dashboard(&session, Flash::danger("No file selected!")).await;
    };

    let stored_name = secure_filename(&upload.file_name);
    if !allowed_file(&upload.file_name) || stored_name.is_empty() {
        tracing::warn!(file_name = %upload.file_name, "Rejected gallery upload");
        return back_to_dashboard(&session, Flash::danger("Invalid file type!")).await;
    }

    state.uploads.save(&stored_name, &upload.data).await?;
    state.store.insert_image(&stored_name, &description)?;
    back_to_dashboard(&session, Flash::success("Image uploaded!")).await
}

async fn image_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    if let Some(image) = state.store.get_image(id)? {
        state.uploads.remove(&image.image_path).await;
        state.store.delete_image(id)?;
    }
    back_to_dashboard(&session, Flash::success("Image deleted!")).await
}

// =============================================================================
// Videos
// =============================================================================

#[derive(Deserialize)]
pub struct VideoForm {
    pub video_url: String,
    #[serde(default)]
    pub description: String,
}

async fn video_add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VideoForm>,
) -> AppResult<Response> {
    state.store.insert_video(&form.video_url, &form.description)?;
    back_to_dashboard(&session, Flash::success("Video added!")).await
}

async fn video_edit_view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let Some(item) = state.store.get_video(id)? else {
        return back_to_dashboard(&session, Flash::danger("Video not found!")).await;
    };
    let flashes = flash::take(&session).await?;
    Ok(HtmlTemplate(EditVideoTemplate { flashes, item }).into_response())
}

async fn video_edit_submit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<VideoForm>,
) -> AppResult<Response> {
    state
        .store
        .update_video(id, &form.video_url, &form.description)?;
    back_to_dashboard(&session, Flash::success("Video updated!")).await
}

async fn video_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state.store.delete_video(id)?;
    back_to_dashboard(&session, Flash::success("Video deleted!")).await
}
