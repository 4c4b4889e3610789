//! Infrastructure layer for NutriSync: durable storage of the session plan.

pub mod dto;
pub mod json_plan_repository;
pub mod paths;
pub mod storage;

pub use crate::json_plan_repository::JsonPlanRepository;
pub use crate::paths::NutriPaths;
