//! Renders a [`PlanResult`] as console text, CSV, JSON and Graphviz DOT.

use crate::core::planner::{PlanResult, PlanSummary};
use crate::domain::model::CONFLICT_TYPE;
use crate::utils::error::{PlanError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 60;
const NAME_WIDTH: usize = 25;

pub const REPORT_FILE: &str = "report.txt";
pub const CONFLICTS_CSV_FILE: &str = "conflicts.csv";
pub const SCHEDULE_CSV_FILE: &str = "schedule.csv";
pub const PLAN_JSON_FILE: &str = "plan.json";
pub const GRAPH_DOT_FILE: &str = "conflict_graph.dot";

#[derive(Debug, Clone, Serialize)]
struct ConflictRow<'a> {
    team_a: &'a str,
    team_b: &'a str,
    distance_km: f64,
    conflict_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ScheduleRow<'a> {
    team: &'a str,
    day: usize,
}

#[derive(Debug, Clone, Serialize)]
struct Assignment<'a> {
    team: &'a str,
    latitude: f64,
    longitude: f64,
    color: usize,
    degree: usize,
    conflicted: bool,
}

#[derive(Debug, Clone, Serialize)]
struct DayRow<'a> {
    day: usize,
    teams: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
struct PlanDocument<'a> {
    generated_at: DateTime<Utc>,
    summary: &'a PlanSummary,
    conflicts: Vec<ConflictRow<'a>>,
    assignments: Vec<Assignment<'a>>,
    schedule: Vec<DayRow<'a>>,
}

fn conflict_rows(result: &PlanResult) -> Vec<ConflictRow<'_>> {
    result
        .conflicts
        .conflicts
        .iter()
        .map(|c| ConflictRow {
            team_a: &result.entities[c.a].name,
            team_b: &result.entities[c.b].name,
            distance_km: c.distance_km,
            conflict_type: CONFLICT_TYPE,
        })
        .collect()
}

pub fn format_conflict_report(result: &PlanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nConflicted Teams and Their Distances:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for row in conflict_rows(result) {
        let _ = writeln!(
            out,
            "{:<width$} - {:<width$} | {:.2} km ({})",
            row.team_a,
            row.team_b,
            row.distance_km,
            row.conflict_type,
            width = NAME_WIDTH
        );
    }
    out
}

pub fn format_schedule_report(result: &PlanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nGenerated Schedule (Conflicting Teams Only):");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for day in result.schedule.days() {
        let _ = writeln!(out, "Day {}: {}", day.day, day.entities.join(", "));
    }
    out
}

pub fn format_text_report(result: &PlanResult) -> String {
    format!(
        "{}{}",
        format_conflict_report(result),
        format_schedule_report(result)
    )
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| PlanError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlanError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn conflicts_csv(result: &PlanResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in conflict_rows(result) {
        writer.serialize(row)?;
    }
    if result.conflicts.is_empty() {
        writer.write_record(["team_a", "team_b", "distance_km", "conflict_type"])?;
    }
    finish_csv(writer)
}

pub fn schedule_csv(result: &PlanResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut wrote_any = false;
    for day in result.schedule.days() {
        for team in day.entities {
            writer.serialize(ScheduleRow { team, day: day.day })?;
            wrote_any = true;
        }
    }
    if !wrote_any {
        writer.write_record(["team", "day"])?;
    }
    finish_csv(writer)
}

pub fn plan_json(result: &PlanResult) -> Result<String> {
    let assignments = result
        .entities
        .iter()
        .enumerate()
        .map(|(id, entity)| Assignment {
            team: &entity.name,
            latitude: entity.latitude,
            longitude: entity.longitude,
            color: result.coloring.color_of(id).unwrap_or(0),
            degree: result.graph.degree(id),
            conflicted: result.conflicts.is_conflicted(id),
        })
        .collect();

    let document = PlanDocument {
        generated_at: Utc::now(),
        summary: &result.summary,
        conflicts: conflict_rows(result),
        assignments,
        schedule: result
            .schedule
            .days()
            .map(|d| DayRow {
                day: d.day,
                teams: d.entities,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

fn dot_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Undirected Graphviz graph laid out on a circle, nodes filled by color.
pub fn conflict_graph_dot(result: &PlanResult) -> String {
    let palette_size = result.coloring.colors_used().max(1) as f64;
    let mut out = String::new();

    let _ = writeln!(out, "graph conflicts {{");
    let _ = writeln!(out, "  layout=circo;");
    let _ = writeln!(
        out,
        "  node [shape=circle, style=filled, fontsize=8, fontname=\"Helvetica-Bold\"];"
    );
    let _ = writeln!(out, "  edge [color=gray, penwidth=1];");

    for (id, entity) in result.entities.iter().enumerate() {
        let color = result.coloring.color_of(id).unwrap_or(0);
        let hue = color as f64 / palette_size;
        let _ = writeln!(
            out,
            "  n{} [label={}, fillcolor=\"{:.3} 0.600 0.950\"];",
            id,
            dot_quote(&entity.name),
            hue
        );
    }

    for conflict in &result.conflicts.conflicts {
        let _ = writeln!(
            out,
            "  n{} -- n{} [label=\"{:.2} km\"];",
            conflict.a, conflict.b, conflict.distance_km
        );
    }

    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coloring::strategy_for;
    use crate::core::planner::Planner;
    use crate::domain::model::{Entity, StrategyKind};

    fn sample() -> PlanResult {
        let entities = vec![
            Entity::new("Rovers", 53.48, -2.24),
            Entity::new("United", 53.46, -2.29),
            Entity::new("Athletic", 51.50, -0.12),
        ];
        Planner::new(20.0, strategy_for(StrategyKind::LargestFirst))
            .plan(entities)
            .unwrap()
    }

    #[test]
    fn test_conflict_report_layout() {
        let report = format_conflict_report(&sample());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Conflicted Teams and Their Distances:");
        assert_eq!(lines[2], "-".repeat(60));
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with(&format!("{:<25} - {:<25} | ", "Rovers", "United")));
        assert!(lines[3].ends_with(" km (TOO CLOSE)"));
    }

    #[test]
    fn test_schedule_report_lists_conflicted_only() {
        let report = format_schedule_report(&sample());
        assert!(report.contains("Generated Schedule (Conflicting Teams Only):"));
        assert!(report.contains("Day 1: Rovers"));
        assert!(report.contains("Day 2: United"));
        assert!(!report.contains("Athletic"));
    }

    #[test]
    fn test_csv_exports() {
        let result = sample();
        let conflicts = conflicts_csv(&result).unwrap();
        let mut lines = conflicts.lines();
        assert_eq!(lines.next(), Some("team_a,team_b,distance_km,conflict_type"));
        assert!(lines.next().unwrap().starts_with("Rovers,United,"));

        let schedule = schedule_csv(&result).unwrap();
        assert_eq!(schedule, "team,day\nRovers,1\nUnited,2\n");
    }

    #[test]
    fn test_csv_headers_without_conflicts() {
        let result = Planner::new(20.0, strategy_for(StrategyKind::LargestFirst))
            .plan(vec![Entity::new("Solo", 0.0, 0.0)])
            .unwrap();
        assert_eq!(
            conflicts_csv(&result).unwrap(),
            "team_a,team_b,distance_km,conflict_type\n"
        );
        assert_eq!(schedule_csv(&result).unwrap(), "team,day\n");
    }

    #[test]
    fn test_plan_json_shape() {
        let json = plan_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["entities"], 3);
        assert_eq!(value["summary"]["conflicts"], 1);
        assert_eq!(value["summary"]["strategy"], "largest_first");
        assert_eq!(value["assignments"].as_array().unwrap().len(), 3);
        assert_eq!(value["assignments"][2]["conflicted"], false);
        assert_eq!(value["schedule"][0]["day"], 1);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_dot_output() {
        let dot = conflict_graph_dot(&sample());
        assert!(dot.starts_with("graph conflicts {"));
        assert!(dot.contains("layout=circo;"));
        assert!(dot.contains("n2 [label=\"Athletic\""));
        assert!(dot.contains("n0 -- n1"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_escapes_quotes() {
        assert_eq!(dot_quote("The \"Reds\""), "\"The \\\"Reds\\\"\"");
    }
}
