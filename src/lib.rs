pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    engine::{PlanEngine, PlanRun},
    pipeline::ProximityPipeline,
    planner::{PlanResult, Planner},
};
pub use crate::utils::error::{PlanError, Result};
