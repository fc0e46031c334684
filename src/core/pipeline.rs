use crate::core::coloring::strategy_for;
use crate::core::ingest::parse_entities;
use crate::core::planner::{PlanResult, Planner};
use crate::core::report;
use crate::core::{ConfigProvider, Entity, OutputFormat, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct ProximityPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ProximityPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    async fn write_output(&self, name: &str, contents: &str, written: &mut Vec<String>) -> Result<()> {
        let path = self.output_file(name);
        tracing::debug!("Writing {} ({} bytes)", path, contents.len());
        self.storage.write_file(&path, contents.as_bytes()).await?;
        written.push(path);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProximityPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Entity>> {
        tracing::debug!("Reading entities from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        parse_entities(
            &data,
            &self.config.columns(),
            self.config.strict_coordinates(),
        )
    }

    async fn transform(&self, entities: Vec<Entity>) -> Result<PlanResult> {
        let planner = Planner::new(
            self.config.threshold_km(),
            strategy_for(self.config.strategy()),
        );
        planner.plan(entities)
    }

    async fn load(&self, result: &PlanResult) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            match format {
                OutputFormat::Text => {
                    let text = report::format_text_report(result);
                    self.write_output(report::REPORT_FILE, &text, &mut written)
                        .await?;
                }
                OutputFormat::Csv => {
                    let conflicts = report::conflicts_csv(result)?;
                    self.write_output(report::CONFLICTS_CSV_FILE, &conflicts, &mut written)
                        .await?;
                    let schedule = report::schedule_csv(result)?;
                    self.write_output(report::SCHEDULE_CSV_FILE, &schedule, &mut written)
                        .await?;
                }
                OutputFormat::Json => {
                    let json = report::plan_json(result)?;
                    self.write_output(report::PLAN_JSON_FILE, &json, &mut written)
                        .await?;
                }
                OutputFormat::Dot => {
                    let dot = report::conflict_graph_dot(result);
                    self.write_output(report::GRAPH_DOT_FILE, &dot, &mut written)
                        .await?;
                }
            }
        }

        Ok(written)
    }
}
