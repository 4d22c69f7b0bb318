// Map resolver: positional, order-preserving, at most one output per input

use tracelink_error::{Diagnostic, ResolveResult};
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};
use tracing::warn;

use super::TraceResolver;

/// Resolver for one-to-one transforming stages (map and its primitive
/// variants): the n-th input produced the n-th output.
pub struct MapResolver;

impl TraceResolver for MapResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        for (b, a) in pair.before().zip(pair.after()) {
            builder.link(b, a);
        }

        // a 1:1 stage cannot emit more than it consumed
        let leftover = pair.after_len().saturating_sub(pair.before_len());
        if leftover > 0 {
            let diagnostic = Diagnostic::UnmatchedAfter { count: leftover };
            warn!(%diagnostic, "inconsistent capture for one-to-one stage");
            builder.diagnostic(diagnostic);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{pair, prim};
    use super::*;

    #[test]
    fn pairs_by_position_in_time_order() {
        let info = pair(
            vec![prim("1", 0), prim("2", 1), prim("3", 2)],
            vec![prim("2", 10), prim("4", 11), prim("6", 12)],
        );
        let correspondence = MapResolver.resolve(&info).unwrap();

        assert_eq!(
            correspondence.produced_by(&prim("1", 0)),
            Some(std::slice::from_ref(&prim("2", 10)))
        );
        assert_eq!(
            correspondence.produced_by(&prim("3", 2)),
            Some(std::slice::from_ref(&prim("6", 12)))
        );
        assert!(correspondence.is_mutually_consistent());
    }

    #[test]
    fn no_before_element_maps_to_more_than_one_after() {
        let info = pair(
            vec![prim("1", 0), prim("2", 1)],
            vec![prim("a", 10), prim("b", 11)],
        );
        let correspondence = MapResolver.resolve(&info).unwrap();

        assert!(correspondence.forward().values().all(|afters| afters.len() <= 1));
    }

    #[test]
    fn leftover_before_elements_map_to_nothing() {
        // the stage was cut short mid-pipeline (short-circuiting terminal)
        let info = pair(
            vec![prim("1", 0), prim("2", 1), prim("3", 2)],
            vec![prim("a", 10)],
        );
        let correspondence = MapResolver.resolve(&info).unwrap();

        assert_eq!(correspondence.produced_by(&prim("2", 1)), Some(&[][..]));
        assert_eq!(correspondence.produced_by(&prim("3", 2)), Some(&[][..]));
        assert!(correspondence.diagnostics().is_empty());
    }

    #[test]
    fn leftover_after_elements_are_diagnosed() {
        let info = pair(vec![prim("1", 0)], vec![prim("a", 10), prim("b", 11)]);
        let correspondence = MapResolver.resolve(&info).unwrap();

        assert_eq!(
            correspondence.diagnostics(),
            &[Diagnostic::UnmatchedAfter { count: 1 }]
        );
    }
}
