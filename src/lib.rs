// ABOUTME: Root library module for the media page server
// ABOUTME: Exposes config, storage, uploads and the HTTP layer (public site + admin panel)

pub mod admin;
pub mod config;
pub mod response;
pub mod server;
pub mod site;
pub mod store;
pub mod uploads;
