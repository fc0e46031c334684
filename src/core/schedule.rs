//! Day-by-day view of a coloring, limited to conflicted entities.

use crate::domain::model::{Coloring, ConflictSet, Entity};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// color -> entity names, colors ascending, names in input order
    pub slots: BTreeMap<usize, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDay<'a> {
    /// 1-based day number (color + 1)
    pub day: usize,
    pub entities: &'a [String],
}

impl Schedule {
    pub fn from_coloring(entities: &[Entity], coloring: &Coloring, conflicts: &ConflictSet) -> Self {
        let mut slots: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (id, entity) in entities.iter().enumerate() {
            if !conflicts.is_conflicted(id) {
                continue;
            }
            if let Some(color) = coloring.color_of(id) {
                slots.entry(color).or_default().push(entity.name.clone());
            }
        }
        Self { slots }
    }

    pub fn days(&self) -> impl Iterator<Item = ScheduleDay<'_>> {
        self.slots.iter().map(|(&color, names)| ScheduleDay {
            day: color + 1,
            entities: names.as_slice(),
        })
    }

    pub fn num_days(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.values().any(|names| names.iter().any(|n| n == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Conflict;

    fn conflict_set(pairs: &[(usize, usize)]) -> ConflictSet {
        let mut set = ConflictSet::default();
        for &(a, b) in pairs {
            set.conflicts.push(Conflict {
                a,
                b,
                distance_km: 1.0,
            });
            set.conflicted.insert(a);
            set.conflicted.insert(b);
        }
        set
    }

    #[test]
    fn test_unconflicted_entities_are_excluded() {
        let entities = vec![
            Entity::new("A", 0.0, 0.0),
            Entity::new("B", 0.0, 0.0),
            Entity::new("Lonely", 0.0, 0.0),
        ];
        let coloring = Coloring::from_colors(vec![0, 1, 0]);
        let schedule = Schedule::from_coloring(&entities, &coloring, &conflict_set(&[(0, 1)]));

        assert!(!schedule.contains("Lonely"));
        assert_eq!(schedule.slots.get(&0), Some(&vec!["A".to_string()]));
        assert_eq!(schedule.slots.get(&1), Some(&vec!["B".to_string()]));
    }

    #[test]
    fn test_days_ascending_and_one_based() {
        let entities = vec![
            Entity::new("A", 0.0, 0.0),
            Entity::new("B", 0.0, 0.0),
            Entity::new("C", 0.0, 0.0),
            Entity::new("D", 0.0, 0.0),
        ];
        let coloring = Coloring::from_colors(vec![2, 0, 1, 0]);
        let set = conflict_set(&[(0, 1), (0, 2), (1, 2), (0, 3)]);
        let schedule = Schedule::from_coloring(&entities, &coloring, &set);

        let days: Vec<(usize, Vec<String>)> = schedule
            .days()
            .map(|d| (d.day, d.entities.to_vec()))
            .collect();
        assert_eq!(
            days,
            vec![
                (1, vec!["B".to_string(), "D".to_string()]),
                (2, vec!["C".to_string()]),
                (3, vec!["A".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_when_no_conflicts() {
        let entities = vec![Entity::new("A", 0.0, 0.0)];
        let schedule =
            Schedule::from_coloring(&entities, &Coloring::from_colors(vec![0]), &ConflictSet::default());
        assert!(schedule.is_empty());
        assert_eq!(schedule.num_days(), 0);
    }
}
