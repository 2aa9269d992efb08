// Infrastructure layer - External dependencies and adapters
pub mod catalog_repository;
pub mod config;
pub mod http_liner_repository;
pub mod http_response;
pub mod unit_transform;
