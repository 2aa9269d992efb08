// Application layer - Use cases, engine and ports
pub mod comparison;
pub mod comparison_service;
pub mod errors;
pub mod liner_repository;
pub mod pulsation_engine;
pub mod validation;
