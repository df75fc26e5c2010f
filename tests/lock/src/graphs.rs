//! Random directed graphs with optional cycles, self-loops and goal nodes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use waypoint_search::{NodeGraph, NodeId, State};

use crate::XorShift;

/// A labelled state carrying a precomputed heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: usize,
    pub goal: bool,
    pub h: i64,
}

impl State for Label {
    fn is_goal(&self) -> bool {
        self.goal
    }

    fn heuristic(&self) -> i64 {
        self.h
    }
}

/// Heuristic attached to each [`Label`] when a topology is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Zero,
    /// Exact remaining cost to the nearest goal. Consistent, so best-first
    /// must still return an optimal path.
    Exact,
}

/// Unreachable nodes get this estimate under [`Heuristic::Exact`].
pub const NO_GOAL_ESTIMATE: i64 = 1_000_000;

/// Adjacency lists plus goal flags. Node 0 is the root and never a goal.
#[derive(Debug, Clone)]
pub struct Topology {
    pub goals: Vec<bool>,
    pub edges: Vec<Vec<(usize, i64)>>,
}

impl Topology {
    /// A seeded random topology.
    ///
    /// Each node gets up to `max_out` distinct children (self-loops and back
    /// edges allowed) with costs in `1..=max_cost`. Non-root nodes are goals
    /// with probability `goal_percent / 100`.
    #[must_use]
    pub fn random(seed: u64, nodes: usize, max_out: usize, max_cost: i64, goal_percent: usize) -> Self {
        let mut rng = XorShift::new(seed);
        let mut goals = Vec::with_capacity(nodes);
        let mut edges = Vec::with_capacity(nodes);
        let cost_range = usize::try_from(max_cost.max(1)).unwrap_or(1);

        for id in 0..nodes {
            goals.push(id != 0 && rng.below(100) < goal_percent);

            let mut out: Vec<(usize, i64)> = Vec::new();
            for _ in 0..rng.below(max_out + 1) {
                let child = rng.below(nodes);
                let cost = 1 + i64::try_from(rng.below(cost_range)).unwrap_or(0);
                if out.iter().all(|&(c, _)| c != child) {
                    out.push((child, cost));
                }
            }
            edges.push(out);
        }
        Self { goals, edges }
    }

    /// Same shape with every edge cost set to 1.
    #[must_use]
    pub fn unit_cost(mut self) -> Self {
        for out in &mut self.edges {
            for edge in out.iter_mut() {
                edge.1 = 1;
            }
        }
        self
    }

    /// Clear every goal flag and add one goal node with no incoming edges.
    #[must_use]
    pub fn with_isolated_goal(mut self) -> Self {
        self.goals.iter_mut().for_each(|g| *g = false);
        self.goals.push(true);
        self.edges.push(Vec::new());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Cheapest cost from each node to any goal (reverse Dijkstra).
    #[must_use]
    pub fn distances_to_goal(&self) -> Vec<Option<i64>> {
        let mut reverse: Vec<Vec<(usize, i64)>> = vec![Vec::new(); self.len()];
        for (from, out) in self.edges.iter().enumerate() {
            for &(to, cost) in out {
                reverse[to].push((from, cost));
            }
        }

        let mut dist: Vec<Option<i64>> = vec![None; self.len()];
        let mut heap: BinaryHeap<Reverse<(i64, usize)>> = self
            .goals
            .iter()
            .enumerate()
            .filter(|(_, goal)| **goal)
            .map(|(id, _)| Reverse((0, id)))
            .collect();
        while let Some(Reverse((d, id))) = heap.pop() {
            if dist[id].is_some() {
                continue;
            }
            dist[id] = Some(d);
            for &(from, cost) in &reverse[id] {
                if dist[from].is_none() {
                    heap.push(Reverse((d + cost, from)));
                }
            }
        }
        dist
    }

    /// Materialize as a [`NodeGraph`]; node `i` gets `NodeId::new(i)`.
    ///
    /// # Panics
    ///
    /// Panics if an edge refers to a node outside the topology.
    #[must_use]
    pub fn build(&self, heuristic: Heuristic) -> NodeGraph<Label> {
        let estimates: Vec<i64> = match heuristic {
            Heuristic::Zero => vec![0; self.len()],
            Heuristic::Exact => self
                .distances_to_goal()
                .into_iter()
                .map(|d| d.unwrap_or(NO_GOAL_ESTIMATE))
                .collect(),
        };

        let mut graph = NodeGraph::new();
        for (id, (&goal, &h)) in self.goals.iter().zip(&estimates).enumerate() {
            graph.add_node(Label { id, goal, h });
        }
        for (from, out) in self.edges.iter().enumerate() {
            for &(to, cost) in out {
                graph
                    .add_child(NodeId::new(from), NodeId::new(to), cost)
                    .expect("topology edges stay inside the graph");
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_seed_stable() {
        let a = Topology::random(7, 20, 3, 5, 10);
        let b = Topology::random(7, 20, 3, 5, 10);
        assert_eq!(a.goals, b.goals);
        assert_eq!(a.edges, b.edges);
        assert!(!a.goals[0], "root is never a goal");
    }

    #[test]
    fn distances_follow_edges_backwards() {
        let topo = Topology {
            goals: vec![false, false, true],
            edges: vec![vec![(1, 2)], vec![(2, 3)], vec![]],
        };
        assert_eq!(topo.distances_to_goal(), vec![Some(5), Some(3), Some(0)]);
    }

    #[test]
    fn isolated_goal_is_unreachable() {
        let topo = Topology::random(3, 10, 2, 4, 50).with_isolated_goal();
        let dist = topo.distances_to_goal();
        assert_eq!(dist[0], None);
        assert_eq!(dist[topo.len() - 1], Some(0));
    }
}
