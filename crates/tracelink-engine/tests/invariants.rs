// Cross-strategy invariants: mutual consistency and coverage must hold
// for arbitrary snapshot pairs, not just well-formed captures

use proptest::prelude::*;
use tracelink_engine::{
    ChunkedResolver, CollapseResolver, FilterResolver, IdentityResolver, MapResolver,
    PairMapResolver, ResolverRegistry, TraceResolver, DEFAULT_RESOLVERS,
};
use tracelink_types::{CapturedValue, Correspondence, TraceElement, TraceInfo};

/// Random snapshot side: small value alphabet, strictly increasing but
/// non-contiguous capture times.
fn side(max_len: usize) -> impl Strategy<Value = Vec<TraceElement>> {
    prop::collection::vec(("[a-e]", 1..4i64), 0..max_len).prop_map(|items| {
        let mut time = 0;
        items
            .into_iter()
            .map(|(render, step)| {
                time += step;
                TraceElement::new(CapturedValue::primitive(render), time)
            })
            .collect()
    })
}

fn assert_invariants(pair: &TraceInfo, correspondence: &Correspondence) {
    assert!(correspondence.is_mutually_consistent());
    for b in pair.before() {
        assert!(correspondence.forward().contains_key(b), "before element missing: {b}");
    }
    for a in pair.after() {
        assert!(correspondence.backward().contains_key(a), "after element missing: {a}");
    }
}

proptest! {
    #[test]
    fn identity_upholds_invariants(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = IdentityResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
    }

    #[test]
    fn filter_upholds_invariants(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = FilterResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
    }

    #[test]
    fn map_upholds_invariants_and_cardinality(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = MapResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
        // no before element produces more than one after element
        prop_assert!(correspondence.forward().values().all(|afters| afters.len() <= 1));
    }

    #[test]
    fn chunked_upholds_invariants(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = ChunkedResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
    }

    #[test]
    fn collapse_upholds_invariants(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = CollapseResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
    }

    #[test]
    fn pair_map_upholds_invariants(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = PairMapResolver.resolve(&pair).unwrap();
        assert_invariants(&pair, &correspondence);
    }

    #[test]
    fn filter_links_preserve_time_order(before in side(8), after in side(8)) {
        let pair = TraceInfo::new(before, after).unwrap();
        let correspondence = FilterResolver.resolve(&pair).unwrap();
        let times: Vec<i64> = correspondence
            .forward()
            .values()
            .flatten()
            .map(|a| a.time)
            .collect();
        let mut sorted = times.clone();
        sorted.sort_unstable();
        prop_assert_eq!(times, sorted);
    }
}

#[test]
fn every_strategy_maps_an_empty_pair_to_an_empty_result() {
    let registry = ResolverRegistry::with_default_resolvers();
    let empty = TraceInfo::new(vec![], vec![]).unwrap();
    for (kind, _) in DEFAULT_RESOLVERS {
        let correspondence = registry
            .resolve(kind, &empty)
            .unwrap_or_else(|violation| panic!("`{kind}` failed on empty input: {violation}"));
        assert!(correspondence.is_empty(), "`{kind}` produced entries from nothing");
    }
}
