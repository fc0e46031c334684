use crate::core::planner::PlanResult;
use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Result of one full run: the plan and the files written for it.
#[derive(Debug)]
pub struct PlanRun {
    pub result: PlanResult,
    pub outputs: Vec<String>,
}

pub struct PlanEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PlanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<PlanRun> {
        let started = Instant::now();
        tracing::info!("🚀 Starting slot planning");

        // Extract
        tracing::info!("📥 Loading entities...");
        let entities = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} entities", entities.len());

        // Transform
        tracing::info!("🧮 Detecting conflicts and coloring...");
        let result = self.pipeline.transform(entities).await?;
        tracing::info!(
            "🧮 {} conflicted entities spread over {} days",
            result.summary.conflicted_entities,
            result.summary.days
        );

        // Load
        tracing::info!("💾 Writing outputs...");
        let outputs = self.pipeline.load(&result).await?;
        for path in &outputs {
            tracing::info!("📁 Output saved to: {}", path);
        }

        tracing::info!("✅ Planning finished in {:?}", started.elapsed());
        Ok(PlanRun { result, outputs })
    }
}
