use greach::{build_index, AdjacencyLists, GraphRef, IndexConfig, Label, Oracle, ReachIndex, Tier};
use proptest::prelude::*;

/// Reference transitive closure by BFS from every node.
fn closure(g: &AdjacencyLists) -> Vec<Vec<bool>> {
    let n = GraphRef::node_count(g);
    let mut reach = vec![vec![false; n]; n];
    for s in 0..n {
        let mut queue = vec![s];
        reach[s][s] = true;
        while let Some(u) = queue.pop() {
            for &v in g.successors_ref(u) {
                if !reach[s][v] {
                    reach[s][v] = true;
                    queue.push(v);
                }
            }
        }
    }
    reach
}

/// Random DAG: every edge points from a lower to a higher id after relabelling by `perm`.
fn dag(n: usize, raw_edges: &[(usize, usize)], perm: &[usize]) -> AdjacencyLists {
    let mut g = AdjacencyLists::new(n);
    for &(a, b) in raw_edges {
        let (a, b) = (a % n, b % n);
        if a == b {
            continue;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        g.add_edge(perm[lo], perm[hi]);
    }
    g
}

/// Parent of every node in the descendant pass's DFS forest: sources in id order,
/// successors in adjacency order, a child adopted by whoever reaches it first.
fn descendant_parents(g: &AdjacencyLists) -> Vec<Option<usize>> {
    let n = GraphRef::node_count(g);
    let mut seen = vec![false; n];
    let mut parent = vec![None; n];
    for root in (0..n).filter(|&u| g.predecessors_ref(u).is_empty()) {
        seen[root] = true;
        let mut stack = vec![(root, 0usize)];
        while let Some((u, cursor)) = stack.last_mut() {
            let u = *u;
            match g.successors_ref(u).get(*cursor) {
                Some(&v) => {
                    *cursor += 1;
                    if !seen[v] {
                        seen[v] = true;
                        parent[v] = Some(u);
                        stack.push((v, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
    parent
}

fn assert_answers_match_closure<const K: usize>(g: &AdjacencyLists, index: &ReachIndex<K>) {
    let expected = closure(g);
    let mut oracle = Oracle::new(index);
    let n = index.node_count();
    for s in 0..n {
        for t in 0..n {
            assert_eq!(oracle.reach(s, t), expected[s][t], "{s} -> {t}");
        }
    }
}

#[test]
fn small_tree_answers() {
    // 0 -> 1 -> 2, 0 -> 3
    let g = AdjacencyLists::from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
    let index = build_index(&g, IndexConfig::default());
    let mut oracle = Oracle::new(&index);
    assert!(oracle.reach(0, 2));
    assert!(!oracle.reach(2, 0));
    assert!(!oracle.reach(3, 1));
    assert!(oracle.reach(0, 0));
    assert!(!oracle.reach(1, 3));
}

#[test]
fn isolated_node_answers() {
    let g = AdjacencyLists::from_edges(5, &[(0, 1), (1, 2), (0, 3)]);
    let index = build_index(&g, IndexConfig::default());
    let mut oracle = Oracle::new(&index);
    assert!(oracle.reach(4, 4));
    assert!(!oracle.reach(0, 4));
    assert!(!oracle.reach(4, 0));
}

#[test]
fn two_cycle_does_not_hang() {
    let g = AdjacencyLists::from_edges(2, &[(0, 1), (1, 0)]);
    let index = build_index(&g, IndexConfig::default());
    let mut oracle = Oracle::new(&index);
    for s in 0..2 {
        for t in 0..2 {
            let _ = oracle.reach(s, t);
        }
    }
}

#[test]
fn multi_edges_and_shared_descendants() {
    // 0 => 1 (twice), 0 -> 2, 1 -> 3, 2 -> 3, 3 -> 4, 5 -> 3
    let g = AdjacencyLists::from_edges(6, &[(0, 1), (0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (5, 3)]);
    let index = build_index(&g, IndexConfig::default());
    assert_answers_match_closure(&g, &index);
}

#[test]
fn tree_intervals_nest() {
    // Out-tree: every edge is a forest edge of the descendant pass.
    let edges = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (5, 6), (7, 8)];
    let g = AdjacencyLists::from_edges(9, &edges);
    let index = build_index(&g, IndexConfig::default());
    for &(p, c) in &edges {
        let (pi, ci) = (index.interval(p), index.interval(c));
        assert!(pi.contains(&ci) && ci.start < ci.finish, "{p} -> {c}");
    }
}

#[test]
fn deep_cross_chain_search_does_not_overflow() {
    // Chain A: 0 -> ... -> m-1. Chain B: m -> ... -> 2m-1, whose tail feeds A's sink.
    // B is labelled after A, so m -> m-1 is invisible to the intervals and the search
    // has to walk all of B.
    let m = 200_000;
    let mut g = AdjacencyLists::new(2 * m);
    for i in (0..m - 1).chain(m..2 * m - 1) {
        g.add_edge(i, i + 1);
    }
    g.add_edge(2 * m - 1, m - 1);
    let index = build_index(&g, IndexConfig::default());
    let mut oracle = Oracle::new(&index);

    let r = oracle.resolve(m, m - 1);
    assert!(r.reachable);
    assert_eq!(r.tier, Tier::Search);
    assert!(!oracle.reach(m - 1, m));
}

#[test]
fn batching_does_not_change_answers() {
    let edges: Vec<(usize, usize)> = (0..40).flat_map(|i| [(i, i + 1), (i, (i * 7 + 3) % 41)]).collect();
    let g = dag(41, &edges, &(0..41).collect::<Vec<_>>());
    for divisor in [None, Some(1), Some(4), Some(0)] {
        let cfg = IndexConfig { batch_divisor: divisor, seed: 3 };
        let index: ReachIndex<1> = ReachIndex::build(&g, cfg);
        assert_answers_match_closure(&g, &index);
    }
}

#[test]
fn repeated_queries_are_idempotent() {
    let g = AdjacencyLists::from_edges(6, &[(0, 1), (1, 2), (3, 2), (3, 4), (5, 4)]);
    let index = build_index(&g, IndexConfig::default());
    let mut oracle = Oracle::new(&index);
    for s in 0..6 {
        for t in 0..6 {
            let first = oracle.resolve(s, t);
            assert_eq!(oracle.resolve(s, t), first);
            assert_eq!(index.reach(s, t), first.reachable);
        }
    }
}

fn dag_strategy() -> impl Strategy<Value = AdjacencyLists> {
    (1usize..24)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0usize..24, 0usize..24), 0..64),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|(n, edges, perm)| dag(n, &edges, &perm))
}

proptest! {
    #[test]
    fn prop_matches_transitive_closure(g in dag_strategy(), seed in any::<u64>()) {
        let cfg = IndexConfig { batch_divisor: Some(2), seed };
        let index: ReachIndex<1> = ReachIndex::build(&g, cfg);
        assert_answers_match_closure(&g, &index);
    }

    #[test]
    fn prop_fallback_equivalence(g in dag_strategy(), seed in any::<u64>()) {
        let index: ReachIndex<2> = ReachIndex::build(&g, IndexConfig { batch_divisor: None, seed });
        let mut oracle = Oracle::new(&index);
        let n = index.node_count();
        for s in 0..n {
            for t in 0..n {
                prop_assert_eq!(oracle.reach(s, t), oracle.reach_exhaustive(s, t));
                prop_assert_eq!(index.reach_by_search(s, t), oracle.reach_exhaustive(s, t));
            }
        }
    }

    #[test]
    fn prop_filters_are_one_sided(g in dag_strategy(), seed in any::<u64>()) {
        let index = build_index(&g, IndexConfig { batch_divisor: Some(1), seed });
        let mut oracle = Oracle::new(&index);
        let n = index.node_count();
        for s in 0..n {
            prop_assert!(oracle.reach(s, s));
            for t in 0..n {
                if oracle.reach(s, t) {
                    prop_assert!(index.descendant_label(s).covers(index.descendant_label(t)));
                    prop_assert!(index.ancestor_label(t).covers(index.ancestor_label(s)));
                }
            }
        }
    }

    #[test]
    fn prop_labels_and_intervals_are_well_formed(g in dag_strategy()) {
        let index = build_index(&g, IndexConfig::default());
        for u in 0..index.node_count() {
            let iv = index.interval(u);
            prop_assert!(iv.start < iv.finish);
            prop_assert_eq!(index.descendant_label(u).is_scalar(), g.successors_ref(u).is_empty());
            prop_assert_eq!(index.ancestor_label(u).is_scalar(), g.predecessors_ref(u).is_empty());
            if let Label::Scalar(pos) = *index.descendant_label(u) {
                let bits = Label::<{ greach::DEFAULT_WORDS }>::BITS;
                prop_assert!(pos < bits);
            }
            for &v in g.successors_ref(u) {
                prop_assert!(index.interval(v).finish <= iv.finish);
            }
        }
    }

    #[test]
    fn prop_dfs_tree_intervals_nest(g in dag_strategy()) {
        let index = build_index(&g, IndexConfig::default());
        for (c, p) in descendant_parents(&g).into_iter().enumerate() {
            let Some(p) = p else { continue };
            let (pi, ci) = (index.interval(p), index.interval(c));
            prop_assert!(pi.start <= ci.start, "{} -> {}: {:?} {:?}", p, c, pi, ci);
            prop_assert!(ci.start < ci.finish, "{} -> {}: {:?} {:?}", p, c, pi, ci);
            prop_assert!(ci.finish <= pi.finish, "{} -> {}: {:?} {:?}", p, c, pi, ci);
        }
    }

    #[test]
    fn prop_seed_changes_labels_not_answers(g in dag_strategy(), a in any::<u64>(), b in any::<u64>()) {
        let ia: ReachIndex<1> = ReachIndex::build(&g, IndexConfig { batch_divisor: None, seed: a });
        let ia2: ReachIndex<1> = ReachIndex::build(&g, IndexConfig { batch_divisor: None, seed: a });
        let ib: ReachIndex<1> = ReachIndex::build(&g, IndexConfig { batch_divisor: None, seed: b });
        prop_assert_eq!(&ia, &ia2);
        let (mut oa, mut ob) = (Oracle::new(&ia), Oracle::new(&ib));
        let n = ia.node_count();
        for s in 0..n {
            for t in 0..n {
                prop_assert_eq!(oa.reach(s, t), ob.reach(s, t));
            }
        }
    }
}
