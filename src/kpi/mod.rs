pub mod engine;
pub mod stage;

#[cfg(test)]
mod engine_tests;

pub use engine::KpiEngine;
pub use stage::{
    classify_stage,
    StageFlags,
};
