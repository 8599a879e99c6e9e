pub mod admin;
pub mod auth;
pub mod export;
pub mod forms;
pub mod middleware;
pub mod public;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

// Re-export the pieces the binary needs to build the web server router.
pub use middleware::{require_admin, require_auth};
pub use public::ApiDoc;
