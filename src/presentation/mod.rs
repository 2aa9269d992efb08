// Presentation layer - HTTP surface
pub mod api_types;
pub mod app_state;
pub mod handlers;
