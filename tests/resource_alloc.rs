use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

use groupcent::{GroupBetweenness, GroupBetweennessConfig, UndirectedGraph};

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn warm_group_queries_allocate_less_than_cold_ones() {
    // This is a "resource consumption" test for the memoization contract:
    // - the first query for a group computes and stores its pairwise
    //   path-betweenness entries (O(n) work and map growth per pair)
    // - repeated queries must only pay for the per-query scratch matrices
    //
    // We count allocations rather than bytes or wall time (portable across
    // OSes/CI).

    let n = 12usize;
    let mut g = UndirectedGraph::with_vertices(n);
    for i in 1..n {
        g.add_edge(i - 1, i, 1.0);
    }
    let scorer = GroupBetweenness::new(&g, GroupBetweennessConfig::default()).unwrap();
    let group = [2usize, 5, 8];

    // Cold: fills the cache for all k*k ordered pairs of the group.
    let r_cold = Region::new(&GLOBAL);
    let cold_score = scorer.group_score(&group).unwrap();
    let s_cold = r_cold.change();

    // Warm: identical query, identical result, cache already filled.
    let r_warm = Region::new(&GLOBAL);
    let warm_score = scorer.group_score(&group).unwrap();
    let s_warm = r_warm.change();

    assert!((cold_score - warm_score).abs() < 1e-12);

    let a_cold = s_cold.allocations;
    let a_warm = s_warm.allocations;
    assert!(
        a_warm < a_cold,
        "expected warm allocations < cold allocations (cold={a_cold}, warm={a_warm})"
    );
}
