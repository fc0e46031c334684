//! Pairwise proximity check over the whole entity list.

use crate::core::distance::entity_distance_km;
use crate::domain::model::{Conflict, ConflictSet, Entity};

/// Pairs strictly closer than this many kilometers conflict.
pub const DEFAULT_THRESHOLD_KM: f64 = 20.0;

/// Checks every unordered pair once and keeps those with
/// `distance < threshold_km`. The result is ordered by distance, then by the
/// input positions of the pair.
pub fn detect_conflicts(entities: &[Entity], threshold_km: f64) -> ConflictSet {
    let mut set = ConflictSet::default();

    for (i, first) in entities.iter().enumerate() {
        for (j, second) in entities.iter().enumerate().skip(i + 1) {
            let distance_km = entity_distance_km(first, second);
            if distance_km < threshold_km {
                tracing::trace!(
                    "{} <-> {}: {:.3} km",
                    first.name,
                    second.name,
                    distance_km
                );
                set.conflicts.push(Conflict {
                    a: i,
                    b: j,
                    distance_km,
                });
            }
        }
    }

    set.conflicts.sort_by(|x, y| {
        x.distance_km
            .total_cmp(&y.distance_km)
            .then(x.a.cmp(&y.a))
            .then(x.b.cmp(&y.b))
    });

    for conflict in &set.conflicts {
        set.conflicted.insert(conflict.a);
        set.conflicted.insert(conflict.b);
    }

    tracing::debug!(
        "Checked {} pairs, {} conflicts under {} km",
        entities.len() * entities.len().saturating_sub(1) / 2,
        set.conflicts.len(),
        threshold_km
    );

    set
}
