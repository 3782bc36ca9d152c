//! Editor and list logic for bookmarky: form validation, URL probing,
//! pagination, and navigation between views.

pub mod config;
pub mod form;
pub mod overview;
pub mod pagination;
pub mod probe;
pub mod routes;

pub use config::Config;
pub use config::ConfigOverrides;
pub use overview::OverviewController;
pub use routes::BookmarkApp;
