//! Conflict graph over all entities, keyed by input position.

use crate::domain::model::{Conflict, Entity, EntityId};
use serde::Serialize;
use std::collections::HashMap;

/// Undirected simple graph. Node `i` is the entity at input position `i`;
/// isolated entities are still nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictGraph {
    /// Adjacency list, neighbours kept sorted by index
    pub adjacency: Vec<Vec<EntityId>>,

    /// Number of undirected edges
    pub num_edges: usize,

    #[serde(skip)]
    index: HashMap<String, EntityId>,
}

impl ConflictGraph {
    /// Creates a graph with `names.len()` nodes and no edges.
    pub fn with_nodes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        let mut count = 0;
        for (id, name) in names.into_iter().enumerate() {
            index.entry(name.into()).or_insert(id);
            count += 1;
        }
        Self {
            adjacency: vec![Vec::new(); count],
            num_edges: 0,
            index,
        }
    }

    /// One node per entity, one edge per conflict pair.
    pub fn build(entities: &[Entity], conflicts: &[Conflict]) -> Self {
        let mut graph = Self::with_nodes(entities.iter().map(|e| e.name.as_str()));
        for conflict in conflicts {
            graph.add_edge(conflict.a, conflict.b);
        }
        tracing::debug!(
            "Built conflict graph: {} nodes, {} edges",
            graph.num_nodes(),
            graph.num_edges
        );
        graph
    }

    /// Adds an undirected edge. Self loops, repeated pairs and unknown nodes
    /// are ignored; returns whether an edge was added.
    pub fn add_edge(&mut self, u: EntityId, v: EntityId) -> bool {
        let n = self.adjacency.len();
        if u == v || u >= n || v >= n {
            return false;
        }
        match self.adjacency[u].binary_search(&v) {
            Ok(_) => false,
            Err(pos) => {
                self.adjacency[u].insert(pos, v);
                if let Err(pos) = self.adjacency[v].binary_search(&u) {
                    self.adjacency[v].insert(pos, u);
                }
                self.num_edges += 1;
                true
            }
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, node: EntityId) -> &[EntityId] {
        &self.adjacency[node]
    }

    pub fn degree(&self, node: EntityId) -> usize {
        self.adjacency[node].len()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn has_edge(&self, u: EntityId, v: EntityId) -> bool {
        self.adjacency
            .get(u)
            .map(|n| n.binary_search(&v).is_ok())
            .unwrap_or(false)
    }

    /// Looks a node up by entity name.
    pub fn node_id(&self, name: &str) -> Option<EntityId> {
        self.index.get(name).copied()
    }

    /// Every edge once, as `(u, v)` with `u < v`, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }
}
