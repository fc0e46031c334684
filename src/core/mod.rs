pub mod coloring;
pub mod conflicts;
pub mod distance;
pub mod engine;
pub mod graph;
pub mod ingest;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod schedule;

pub use crate::domain::model::{
    ColumnMapping, Coloring, Conflict, ConflictSet, Entity, EntityId, OutputFormat, StrategyKind,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
