//! The integer chain: root(0) -> 1 -> 2 -> 3 -> 4 plus root -> goal(5).
//!
//! Depth-first must exhaust the chain before it backtracks to the goal;
//! breadth-first reaches the goal right after the root.


use waypoint_harness::report::render_text;
use waypoint_harness::worlds::int_chain::{demo_graph, RootEdgeOrder};
use waypoint_search::{BestFirst, BreadthFirst, DepthFirst, NodeId, SearchEngine, Termination};

#[test]
fn depth_first_exhausts_chain_before_goal() {
    let demo = demo_graph(RootEdgeOrder::GoalFirst).unwrap();
    let result = SearchEngine::new(DepthFirst).search(&demo.graph, demo.root).unwrap();

    assert_eq!(result.outcome.total_cost(), Some(1));
    assert_eq!(result.outcome.path(), Some(&[demo.root, demo.goal][..]));
    assert_eq!(result.outcome.nodes_expanded(), 5);
    assert_eq!(result.trace.metadata.total_extractions, 6);

    let visited: Vec<NodeId> = result.trace.expansions.iter().map(|e| e.node).collect();
    let mut expected = vec![demo.root];
    expected.extend(&demo.chain);
    assert_eq!(visited, expected);
    assert_eq!(
        result.trace.metadata.termination,
        Termination::GoalReached { node: demo.goal }
    );
}

#[test]
fn depth_first_takes_last_inserted_child_first() {
    let demo = demo_graph(RootEdgeOrder::ChainFirst).unwrap();
    let result = SearchEngine::new(DepthFirst).search(&demo.graph, demo.root).unwrap();
    assert_eq!(result.outcome.nodes_expanded(), 1);
    assert_eq!(result.outcome.path(), Some(&[demo.root, demo.goal][..]));
}

#[test]
fn breadth_first_reaches_goal_after_root() {
    let demo = demo_graph(RootEdgeOrder::GoalFirst).unwrap();
    let result = SearchEngine::new(BreadthFirst).search(&demo.graph, demo.root).unwrap();
    assert_eq!(result.outcome.nodes_expanded(), 1);
    assert_eq!(result.trace.metadata.total_extractions, 2);
    assert_eq!(result.outcome.total_cost(), Some(1));

    let demo = demo_graph(RootEdgeOrder::ChainFirst).unwrap();
    let result = SearchEngine::new(BreadthFirst).search(&demo.graph, demo.root).unwrap();
    assert_eq!(result.outcome.nodes_expanded(), 2);
    assert_eq!(result.outcome.path(), Some(&[demo.root, demo.goal][..]));
}

#[test]
fn best_first_breaks_ties_by_creation_order() {
    // Both root children have f = 1; the one created first is popped first.
    let demo = demo_graph(RootEdgeOrder::GoalFirst).unwrap();
    let result = SearchEngine::new(BestFirst::default())
        .search(&demo.graph, demo.root)
        .unwrap();
    assert_eq!(result.outcome.nodes_expanded(), 1);

    let demo = demo_graph(RootEdgeOrder::ChainFirst).unwrap();
    let result = SearchEngine::new(BestFirst::default())
        .search(&demo.graph, demo.root)
        .unwrap();
    assert_eq!(result.outcome.nodes_expanded(), 2);
    assert_eq!(result.outcome.total_cost(), Some(1));
}

#[test]
fn depth_first_report_text() {
    let demo = demo_graph(RootEdgeOrder::GoalFirst).unwrap();
    let result = SearchEngine::new(DepthFirst).search(&demo.graph, demo.root).unwrap();
    assert_eq!(
        render_text(&result, &demo.graph),
        "Found goal node: int(5, goal)\nCost: 1\nNodes expanded: 5\nPath:\n- int(0)\n- int(5, goal)\n"
    );
}
