// ABOUTME: Admin panel module: login gate, dashboard and the content editing routes
// ABOUTME: Everything under /admin except login/logout sits behind the session guard

pub mod auth;
pub mod flash;
pub mod login;
pub mod routes;
pub mod templates;

pub use auth::{require_admin, CurrentAdmin};
pub use login::login_router;
pub use routes::admin_router;
