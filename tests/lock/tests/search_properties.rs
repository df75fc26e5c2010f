//! Properties every expansion order must hold on arbitrary finite graphs:
//! bounded expansion, minimal-edge breadth-first paths, optimal best-first
//! costs, repeatable runs, and exhaustion when no goal is reachable.


use lock_tests::{min_cost_to_goal, min_edges_to_goal, path_cost, Heuristic, Label, Topology, SEEDS};
use waypoint_search::{
    ExpansionOrder, NodeGraph, NodeId, OrderKind, SearchEngine, SearchOutcome, SearchPolicy,
    SearchResult, Termination,
};

const ORDERS: [OrderKind; 3] = [OrderKind::BreadthFirst, OrderKind::DepthFirst, OrderKind::BestFirst];
const ROOT: NodeId = NodeId::new(0);

fn engine(order: OrderKind) -> SearchEngine<Box<dyn ExpansionOrder<Label>>> {
    SearchEngine::from_policy(&SearchPolicy::with_order(order))
}

fn run(order: OrderKind, graph: &NodeGraph<Label>) -> SearchResult {
    engine(order).search(graph, ROOT).unwrap()
}

// ---------------------------------------------------------------------------
// Expansion bound
// ---------------------------------------------------------------------------

#[test]
fn expanded_never_exceeds_reachable_nodes() {
    for seed in SEEDS {
        for heuristic in [Heuristic::Zero, Heuristic::Exact] {
            let graph = Topology::random(seed, 40, 4, 9, 5).build(heuristic);
            let reachable = graph.reachable_from(ROOT) as u64;

            for order in ORDERS {
                let result = run(order, &graph);
                let expanded = result.outcome.nodes_expanded();
                assert!(
                    expanded <= reachable,
                    "seed {seed} {order}: expanded {expanded} > reachable {reachable}"
                );

                let meta = &result.trace.metadata;
                assert_eq!(meta.total_expansions, expanded);
                assert_eq!(
                    meta.total_extractions,
                    expanded + u64::from(result.outcome.is_found())
                );
                assert_eq!(result.trace.expansions.len() as u64, expanded);
            }
        }
    }
}

#[test]
fn every_found_path_is_a_real_path_to_a_goal() {
    for seed in SEEDS {
        let graph = Topology::random(seed, 30, 3, 9, 10).build(Heuristic::Zero);
        for order in ORDERS {
            let result = run(order, &graph);
            let SearchOutcome::Found(found) = &result.outcome else {
                continue;
            };
            assert_eq!(found.path.first(), Some(&ROOT));
            assert_eq!(found.path.last(), Some(&found.goal));
            assert!(graph.state(found.goal).unwrap().goal);
            assert_eq!(
                path_cost(&graph, &found.path),
                Some(found.total_cost),
                "seed {seed} {order}: reported cost disagrees with the path"
            );
            assert_eq!(
                result.trace.metadata.termination,
                Termination::GoalReached { node: found.goal }
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Breadth-first: fewest edges
// ---------------------------------------------------------------------------

#[test]
fn breadth_first_path_has_fewest_edges() {
    for seed in SEEDS {
        let graph = Topology::random(seed, 50, 3, 1, 6).unit_cost().build(Heuristic::Zero);
        let result = run(OrderKind::BreadthFirst, &graph);

        match min_edges_to_goal(&graph, ROOT) {
            Some(edges) => {
                let path = result.outcome.path().expect("a goal is reachable");
                assert_eq!(path.len() - 1, edges, "seed {seed}");
                assert_eq!(result.outcome.total_cost(), Some(edges as i64));
            }
            None => assert!(!result.outcome.is_found(), "seed {seed}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Best-first: optimal cost under an admissible heuristic
// ---------------------------------------------------------------------------

#[test]
fn best_first_cost_is_optimal() {
    for seed in SEEDS {
        let topology = Topology::random(seed, 40, 4, 9, 8);
        for heuristic in [Heuristic::Zero, Heuristic::Exact] {
            let graph = topology.build(heuristic);
            let result = run(OrderKind::BestFirst, &graph);
            assert_eq!(
                result.outcome.total_cost(),
                min_cost_to_goal(&graph, ROOT),
                "seed {seed} {heuristic:?}"
            );
        }
    }
}

#[test]
fn exact_heuristic_expands_no_more_than_zero_heuristic() {
    for seed in SEEDS {
        let topology = Topology::random(seed, 40, 4, 9, 8);
        let blind = run(OrderKind::BestFirst, &topology.build(Heuristic::Zero));
        let informed = run(OrderKind::BestFirst, &topology.build(Heuristic::Exact));
        assert!(
            informed.outcome.nodes_expanded() <= blind.outcome.nodes_expanded(),
            "seed {seed}: informed {} > blind {}",
            informed.outcome.nodes_expanded(),
            blind.outcome.nodes_expanded()
        );
    }
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_identical() {
    for seed in SEEDS {
        let graph = Topology::random(seed, 40, 4, 9, 5).build(Heuristic::Exact);
        for order in ORDERS {
            let first = run(order, &graph);
            let first_digest = first.trace.digest().unwrap();
            for _ in 0..3 {
                let again = run(order, &graph);
                assert_eq!(again.outcome, first.outcome, "seed {seed} {order}");
                assert_eq!(again.trace.digest().unwrap(), first_digest, "seed {seed} {order}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// No path
// ---------------------------------------------------------------------------

#[test]
fn unreachable_goal_exhausts_the_reachable_component() {
    for seed in SEEDS {
        let graph = Topology::random(seed, 30, 3, 9, 0)
            .with_isolated_goal()
            .build(Heuristic::Zero);
        let reachable = graph.reachable_from(ROOT) as u64;

        for order in ORDERS {
            let result = run(order, &graph);
            assert_eq!(
                result.outcome,
                SearchOutcome::NotFound {
                    nodes_expanded: reachable
                },
                "seed {seed} {order}"
            );
            assert_eq!(result.trace.metadata.termination, Termination::FrontierExhausted);
            assert!(result.path_states(&graph).is_empty());
        }
    }
}
