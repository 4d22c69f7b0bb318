// Identity resolver: value-preserving stages that may reshuffle order

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracelink_error::ResolveResult;
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceElement, TraceInfo, ValueKey};

use super::TraceResolver;

/// Resolver for stages that pass every value through exactly once but may
/// reorder them (peek, sorted, boxed).
///
/// After elements are grouped by identity key, each group keeping its
/// internal capture order; every before element then consumes the next
/// unused after element of its own key. Before elements whose key has no
/// remaining after element map to nothing.
pub struct IdentityResolver;

impl TraceResolver for IdentityResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        let mut by_key: IndexMap<ValueKey, VecDeque<&TraceElement>> = IndexMap::new();
        for a in pair.after() {
            by_key.entry(a.key()).or_default().push_back(a);
        }

        for b in pair.before() {
            if let Some(group) = by_key.get_mut(&b.key()) {
                if let Some(a) = group.pop_front() {
                    builder.link(b, a);
                }
            }
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{obj, pair, prim};
    use super::*;

    #[test]
    fn one_to_one_capture_pairs_in_time_order() {
        let info = pair(
            vec![obj(1, "a", 10), obj(2, "b", 11), obj(3, "c", 12)],
            vec![obj(1, "a", 20), obj(2, "b", 21), obj(3, "c", 22)],
        );
        let correspondence = IdentityResolver.resolve(&info).unwrap();

        for (b, a) in info.before().zip(info.after()) {
            assert_eq!(correspondence.produced_by(b), Some(std::slice::from_ref(a)));
            assert_eq!(correspondence.origin_of(a), Some(std::slice::from_ref(b)));
        }
        assert!(correspondence.is_mutually_consistent());
    }

    #[test]
    fn reshuffled_order_matches_by_key() {
        // a sorted() stage: same values, different after order
        let info = pair(
            vec![prim("3", 10), prim("1", 11), prim("2", 12)],
            vec![prim("1", 20), prim("2", 21), prim("3", 22)],
        );
        let correspondence = IdentityResolver.resolve(&info).unwrap();

        assert_eq!(
            correspondence.produced_by(&prim("3", 10)),
            Some(std::slice::from_ref(&prim("3", 22)))
        );
        assert_eq!(
            correspondence.produced_by(&prim("1", 11)),
            Some(std::slice::from_ref(&prim("1", 20)))
        );
    }

    #[test]
    fn duplicate_keys_consume_round_robin() {
        let info = pair(
            vec![prim("x", 1), prim("x", 2)],
            vec![prim("x", 10), prim("x", 11)],
        );
        let correspondence = IdentityResolver.resolve(&info).unwrap();

        // first before x takes the first after x, second takes the second
        assert_eq!(
            correspondence.produced_by(&prim("x", 1)),
            Some(std::slice::from_ref(&prim("x", 10)))
        );
        assert_eq!(
            correspondence.produced_by(&prim("x", 2)),
            Some(std::slice::from_ref(&prim("x", 11)))
        );
    }

    #[test]
    fn unmatched_before_maps_to_nothing() {
        let info = pair(vec![prim("a", 1), prim("b", 2)], vec![prim("a", 10)]);
        let correspondence = IdentityResolver.resolve(&info).unwrap();

        assert_eq!(correspondence.produced_by(&prim("b", 2)), Some(&[][..]));
        assert!(correspondence.is_mutually_consistent());
    }
}
