// ABOUTME: Askama template structs for the admin panel
// ABOUTME: Templates are compiled into binary at build time

use askama::Template;

use super::flash::Flash;
use crate::store::{GalleryImage, MediaCoverage, PressRelease, Video};

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin: String,
    pub flashes: Vec<Flash>,
    pub press_releases: Vec<PressRelease>,
    pub media_coverage: Vec<MediaCoverage>,
    pub images: Vec<GalleryImage>,
    pub videos: Vec<Video>,
}

#[derive(Template)]
#[template(path = "admin/edit_press.html")]
pub struct EditPressTemplate {
    pub flashes: Vec<Flash>,
    pub item: PressRelease,
}

#[derive(Template)]
#[template(path = "admin/edit_media.html")]
pub struct EditMediaTemplate {
    pub flashes: Vec<Flash>,
    pub item: MediaCoverage,
}

#[derive(Template)]
#[template(path = "admin/edit_video.html")]
pub struct EditVideoTemplate {
    pub flashes: Vec<Flash>,
    pub item: Video,
}
