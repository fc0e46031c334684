//! Greedy graph coloring behind a swappable strategy.
//!
//! Every strategy hands out the smallest color not already taken by a colored
//! neighbour; they differ only in the order nodes are visited.

use crate::core::graph::ConflictGraph;
use crate::domain::model::{Coloring, EntityId, StrategyKind};
use std::cmp::Reverse;
use std::collections::HashSet;

pub trait ColoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns a proper coloring of `graph`: adjacent nodes never share a color.
    fn color(&self, graph: &ConflictGraph) -> Coloring;
}

/// Colors nodes in the given order. Nodes missing from `order` are colored
/// afterwards in index order so the result always covers the whole graph.
pub fn greedy_color_in_order(graph: &ConflictGraph, order: &[EntityId]) -> Coloring {
    let n = graph.num_nodes();
    let mut colors: Vec<Option<usize>> = vec![None; n];

    // A node is visited once it holds a color; duplicates and unknown ids in
    // `order` are skipped.
    let listed = order.iter().copied().filter(|&v| v < n);
    for node in listed.chain(0..n) {
        if colors[node].is_some() {
            continue;
        }
        colors[node] = Some(smallest_free_color(graph, node, &colors));
    }

    Coloring::from_colors(colors.into_iter().map(|c| c.unwrap_or(0)).collect())
}

fn smallest_free_color(graph: &ConflictGraph, node: EntityId, colors: &[Option<usize>]) -> usize {
    let neighbors = graph.neighbors(node);
    // At most deg(node) colors are blocked, so one of 0..=deg is free.
    let mut used = vec![false; neighbors.len() + 1];
    for &nb in neighbors {
        if let Some(c) = colors[nb] {
            if c < used.len() {
                used[c] = true;
            }
        }
    }
    used.iter().position(|&taken| !taken).unwrap_or(neighbors.len())
}

/// Largest-first: descending degree, ties by input position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirst;

impl LargestFirst {
    pub fn order(graph: &ConflictGraph) -> Vec<EntityId> {
        let mut order: Vec<EntityId> = (0..graph.num_nodes()).collect();
        order.sort_by_key(|&v| (Reverse(graph.degree(v)), v));
        order
    }
}

impl ColoringStrategy for LargestFirst {
    fn name(&self) -> &'static str {
        StrategyKind::LargestFirst.as_str()
    }

    fn color(&self, graph: &ConflictGraph) -> Coloring {
        greedy_color_in_order(graph, &Self::order(graph))
    }
}

/// DSATUR: always color the node whose neighbours already use the most
/// distinct colors; ties by degree, then input position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dsatur;

impl ColoringStrategy for Dsatur {
    fn name(&self) -> &'static str {
        StrategyKind::Dsatur.as_str()
    }

    fn color(&self, graph: &ConflictGraph) -> Coloring {
        let n = graph.num_nodes();
        let mut colors: Vec<Option<usize>> = vec![None; n];
        let mut neighbor_colors: Vec<HashSet<usize>> = vec![HashSet::new(); n];

        for _ in 0..n {
            let Some(node) = (0..n)
                .filter(|&v| colors[v].is_none())
                .max_by_key(|&v| (neighbor_colors[v].len(), graph.degree(v), Reverse(v)))
            else {
                break;
            };

            let color = smallest_free_color(graph, node, &colors);
            colors[node] = Some(color);

            for &nb in graph.neighbors(node) {
                if colors[nb].is_none() {
                    neighbor_colors[nb].insert(color);
                }
            }
        }

        Coloring::from_colors(colors.into_iter().map(|c| c.unwrap_or(0)).collect())
    }
}

pub fn strategy_for(kind: StrategyKind) -> Box<dyn ColoringStrategy> {
    match kind {
        StrategyKind::LargestFirst => Box::new(LargestFirst),
        StrategyKind::Dsatur => Box::new(Dsatur),
    }
}

/// Edges whose endpoints share a color (0 for a proper coloring).
pub fn count_violations(graph: &ConflictGraph, coloring: &Coloring) -> usize {
    graph
        .edges()
        .filter(|&(u, v)| coloring.color_of(u) == coloring.color_of(v))
        .count()
}

pub fn is_proper_coloring(graph: &ConflictGraph, coloring: &Coloring) -> bool {
    coloring.len() == graph.num_nodes() && count_violations(graph, coloring) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> ConflictGraph {
        let mut graph = ConflictGraph::with_nodes((0..n).map(|i| format!("N{}", i)));
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    fn strategies() -> Vec<Box<dyn ColoringStrategy>> {
        vec![strategy_for(StrategyKind::LargestFirst), strategy_for(StrategyKind::Dsatur)]
    }

    #[test]
    fn test_empty_graph() {
        let graph = graph_from_edges(0, &[]);
        for s in strategies() {
            assert!(s.color(&graph).is_empty());
        }
    }

    #[test]
    fn test_edgeless_graph_uses_one_color() {
        let graph = graph_from_edges(3, &[]);
        for s in strategies() {
            assert_eq!(s.color(&graph).colors, vec![0, 0, 0], "{}", s.name());
        }
    }

    #[test]
    fn test_single_edge() {
        let graph = graph_from_edges(2, &[(0, 1)]);
        let coloring = LargestFirst.color(&graph);
        assert_eq!(coloring.colors, vec![0, 1]);
    }

    #[test]
    fn test_triangle_needs_three_colors() {
        let graph = graph_from_edges(3, &[(0, 1), (0, 2), (1, 2)]);
        for s in strategies() {
            let coloring = s.color(&graph);
            assert!(is_proper_coloring(&graph, &coloring));
            assert_eq!(coloring.colors_used(), 3);
        }
        assert_eq!(LargestFirst.color(&graph).colors, vec![0, 1, 2]);
    }

    #[test]
    fn test_largest_first_order() {
        // Star centred on node 3, plus an isolated node 4 and edge 0-1.
        let graph = graph_from_edges(5, &[(3, 0), (3, 1), (3, 2), (0, 1)]);
        assert_eq!(LargestFirst::order(&graph), vec![3, 0, 1, 2, 4]);

        let coloring = LargestFirst.color(&graph);
        assert_eq!(coloring.colors, vec![1, 2, 1, 0, 0]);
        assert!(is_proper_coloring(&graph, &coloring));
    }

    #[test]
    fn test_bounded_by_max_degree_plus_one() {
        // Crown-like graph where naive orders blow up.
        let edges = [
            (0, 5),
            (0, 6),
            (0, 7),
            (1, 4),
            (1, 6),
            (1, 7),
            (2, 4),
            (2, 5),
            (2, 7),
            (3, 4),
            (3, 5),
            (3, 6),
        ];
        let graph = graph_from_edges(8, &edges);
        for s in strategies() {
            let coloring = s.color(&graph);
            assert!(is_proper_coloring(&graph, &coloring), "{}", s.name());
            assert!(coloring.colors_used() <= graph.max_degree() + 1);
        }
    }

    #[test]
    fn test_dsatur_on_bipartite_uses_two_colors() {
        let graph = graph_from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let coloring = Dsatur.color(&graph);
        assert!(is_proper_coloring(&graph, &coloring));
        assert_eq!(coloring.colors_used(), 2);
    }

    #[test]
    fn test_order_helper_covers_missing_nodes() {
        let graph = graph_from_edges(3, &[(0, 1)]);
        let coloring = greedy_color_in_order(&graph, &[1]);
        assert_eq!(coloring.colors, vec![1, 0, 0]);
    }

    #[test]
    fn test_order_helper_skips_repeated_and_unknown_nodes() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let coloring = greedy_color_in_order(&graph, &[2, 2, 9, 0, 2]);
        // 2 first, then 0; 1 and 3 trail in index order.
        assert_eq!(coloring.colors, vec![0, 1, 0, 1]);
        assert!(is_proper_coloring(&graph, &coloring));
    }

    #[test]
    fn test_order_helper_on_long_path() {
        let n = 20_000;
        let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        let graph = graph_from_edges(n, &edges);
        let order: Vec<EntityId> = (0..n).step_by(2).collect();

        let coloring = greedy_color_in_order(&graph, &order);
        assert_eq!(coloring.len(), n);
        assert_eq!(coloring.colors_used(), 2);
        assert!(is_proper_coloring(&graph, &coloring));
    }

    #[test]
    fn test_violation_count() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let bad = Coloring::from_colors(vec![0, 0, 0]);
        assert_eq!(count_violations(&graph, &bad), 2);
        assert!(!is_proper_coloring(&graph, &bad));
        assert!(!is_proper_coloring(&graph, &Coloring::from_colors(vec![0, 1])));
    }

    #[test]
    fn test_deterministic() {
        let graph = graph_from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (2, 3)]);
        for s in strategies() {
            assert_eq!(s.color(&graph), s.color(&graph));
        }
    }
}
