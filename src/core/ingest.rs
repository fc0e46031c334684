use crate::domain::model::{ColumnMapping, Entity};
use crate::utils::error::{PlanError, Result};
use std::collections::HashMap;

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| PlanError::MissingColumnError {
            column: column.to_string(),
        })
}

fn parse_coordinate(row: usize, field: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(PlanError::MalformedRecordError {
            row,
            field: field.to_string(),
            value: raw.to_string(),
            reason: "missing value".to_string(),
        });
    }

    let value: f64 = raw.parse().map_err(|_| PlanError::MalformedRecordError {
        row,
        field: field.to_string(),
        value: raw.to_string(),
        reason: "not a number".to_string(),
    })?;

    if !value.is_finite() {
        return Err(PlanError::MalformedRecordError {
            row,
            field: field.to_string(),
            value: raw.to_string(),
            reason: "not a finite number".to_string(),
        });
    }

    Ok(value)
}

/// Reads entities from CSV bytes with a header row.
///
/// Rows are numbered by their line in the file (the header is line 1).
/// Any malformed row aborts the whole load, duplicate names are rejected,
/// and out-of-range coordinates are either logged or rejected depending on
/// `strict_coordinates`.
pub fn parse_entities(
    data: &[u8],
    columns: &ColumnMapping,
    strict_coordinates: bool,
) -> Result<Vec<Entity>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let name_idx = column_index(&headers, &columns.name)?;
    let lat_idx = column_index(&headers, &columns.latitude)?;
    let lon_idx = column_index(&headers, &columns.longitude)?;

    let mut entities = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in reader.records() {
        let record = record?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(entities.len() + 2);

        let name = record.get(name_idx).unwrap_or("");
        if name.is_empty() {
            return Err(PlanError::MalformedRecordError {
                row,
                field: columns.name.clone(),
                value: String::new(),
                reason: "entity name cannot be empty".to_string(),
            });
        }

        let latitude = parse_coordinate(row, &columns.latitude, record.get(lat_idx))?;
        let longitude = parse_coordinate(row, &columns.longitude, record.get(lon_idx))?;

        if let Some(&first_row) = seen.get(name) {
            return Err(PlanError::DuplicateEntityError {
                name: name.to_string(),
                first_row,
                row,
            });
        }
        seen.insert(name.to_string(), row);

        let entity = Entity::new(name, latitude, longitude);
        if !entity.has_valid_range() {
            if strict_coordinates {
                return Err(PlanError::CoordinateRangeError {
                    row,
                    name: entity.name,
                    latitude,
                    longitude,
                });
            }
            tracing::warn!(
                "⚠️ '{}' (row {}) has out-of-range coordinates ({}, {}); distances will be meaningless",
                entity.name,
                row,
                latitude,
                longitude
            );
        }

        entities.push(entity);
    }

    tracing::debug!("Parsed {} entities", entities.len());
    Ok(entities)
}
