//! Versioned DTOs for persisted NutriSync data.

pub mod plan_record;

pub use plan_record::{
    FormSnapshotDTO, PLAN_RECORD_ENTITY, PlanPayloadDTO, PlanRecordV1_0, PlanRecordV1_1,
    create_plan_record_migrator,
};
