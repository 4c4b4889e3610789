//! Interaction layer for NutriSync: the HTTP client for the plan service.

pub mod http_client;

pub use http_client::HttpNutritionClient;
