use crate::core::planner::PlanResult;
use crate::domain::model::{ColumnMapping, Entity, OutputFormat, StrategyKind};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn columns(&self) -> ColumnMapping;
    fn threshold_km(&self) -> f64;
    fn strategy(&self) -> StrategyKind;
    fn strict_coordinates(&self) -> bool;
    fn output_formats(&self) -> Vec<OutputFormat>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Entity>>;
    async fn transform(&self, entities: Vec<Entity>) -> Result<PlanResult>;
    /// Writes the configured outputs and returns the paths written.
    async fn load(&self, result: &PlanResult) -> Result<Vec<String>>;
}
