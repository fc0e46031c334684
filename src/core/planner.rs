use crate::core::coloring::{count_violations, ColoringStrategy};
use crate::core::conflicts::detect_conflicts;
use crate::core::graph::ConflictGraph;
use crate::core::schedule::Schedule;
use crate::domain::model::{Coloring, ConflictSet, Entity};
use crate::utils::error::{PlanError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub entities: usize,
    pub conflicts: usize,
    pub conflicted_entities: usize,
    pub colors_used: usize,
    pub days: usize,
    pub max_degree: usize,
    pub threshold_km: f64,
    pub strategy: String,
}

/// Everything the planner derives from one entity list.
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub entities: Vec<Entity>,
    pub conflicts: ConflictSet,
    pub graph: ConflictGraph,
    pub coloring: Coloring,
    pub schedule: Schedule,
    pub summary: PlanSummary,
}

pub struct Planner {
    threshold_km: f64,
    strategy: Box<dyn ColoringStrategy>,
}

impl Planner {
    pub fn new(threshold_km: f64, strategy: Box<dyn ColoringStrategy>) -> Self {
        Self {
            threshold_km,
            strategy,
        }
    }

    /// Runs detection, graph build, coloring and scheduling in that order.
    pub fn plan(&self, entities: Vec<Entity>) -> Result<PlanResult> {
        let conflicts = detect_conflicts(&entities, self.threshold_km);
        tracing::info!(
            "🔎 {} conflicts among {} entities (< {} km)",
            conflicts.len(),
            entities.len(),
            self.threshold_km
        );

        let graph = ConflictGraph::build(&entities, &conflicts.conflicts);

        let coloring = self.strategy.color(&graph);
        let violations = count_violations(&graph, &coloring);
        if coloring.len() != graph.num_nodes() || violations > 0 {
            return Err(PlanError::ProcessingError {
                message: format!(
                    "strategy '{}' produced an improper coloring ({} of {} nodes colored, {} violating edges)",
                    self.strategy.name(),
                    coloring.len(),
                    graph.num_nodes(),
                    violations
                ),
            });
        }

        let schedule = Schedule::from_coloring(&entities, &coloring, &conflicts);
        tracing::info!(
            "🎨 {} coloring uses {} colors, {} scheduled days",
            self.strategy.name(),
            coloring.colors_used(),
            schedule.num_days()
        );

        let summary = PlanSummary {
            entities: entities.len(),
            conflicts: conflicts.len(),
            conflicted_entities: conflicts.conflicted.len(),
            colors_used: coloring.colors_used(),
            days: schedule.num_days(),
            max_degree: graph.max_degree(),
            threshold_km: self.threshold_km,
            strategy: self.strategy.name().to_string(),
        };

        Ok(PlanResult {
            entities,
            conflicts,
            graph,
            coloring,
            schedule,
            summary,
        })
    }
}
