// Pass-through resolver for stages whose correspondence was recorded
// verbatim by the capture mechanism (distinct)

use tracelink_error::{ResolveResult, StructuralViolation};
use tracelink_types::{Correspondence, ElementMap, TraceInfo};

use super::TraceResolver;

/// Resolver for stages where the capture mechanism already established
/// the correspondence and recorded it alongside the snapshots.
///
/// The recorded direct and reverse maps are materialized into element
/// terms and returned as-is; each side is seeded with its snapshot's
/// elements so unmentioned elements still appear with empty lists.
/// Recorded times that match no captured element are ignored.
pub struct RecordedTraceResolver;

impl TraceResolver for RecordedTraceResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        if pair.is_empty() {
            return Ok(Correspondence::empty());
        }
        let recorded = pair.recorded().ok_or(StructuralViolation::MissingRecordedTrace)?;

        let mut forward = ElementMap::new();
        for b in pair.before() {
            forward.entry(b.clone()).or_default();
        }
        for (before_time, after_times) in &recorded.direct {
            if let Some(b) = pair.before_at(*before_time) {
                let produced = forward.entry(b.clone()).or_default();
                for at in after_times {
                    if let Some(a) = pair.after_at(*at) {
                        produced.push(a.clone());
                    }
                }
            }
        }

        let mut backward = ElementMap::new();
        for a in pair.after() {
            backward.entry(a.clone()).or_default();
        }
        for (after_time, before_times) in &recorded.reverse {
            if let Some(a) = pair.after_at(*after_time) {
                let origins = backward.entry(a.clone()).or_default();
                for bt in before_times {
                    if let Some(b) = pair.before_at(*bt) {
                        origins.push(b.clone());
                    }
                }
            }
        }

        Ok(Correspondence::from_parts(forward, backward, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tracelink_types::{RecordedTrace, TraceInfo};

    use super::super::test_support::{obj, prim};
    use super::*;

    fn recorded(
        direct: Vec<(i64, Vec<i64>)>,
        reverse: Vec<(i64, Vec<i64>)>,
    ) -> RecordedTrace {
        RecordedTrace {
            direct: direct.into_iter().collect::<BTreeMap<_, _>>(),
            reverse: reverse.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn recorded_maps_are_returned_as_captured() {
        // distinct: the two equal objects collapse into the first
        let info = TraceInfo::with_recorded(
            vec![obj(1, "a", 0), obj(1, "a", 1), obj(2, "b", 2)],
            vec![obj(1, "a", 10), obj(2, "b", 11)],
            recorded(
                vec![(0, vec![10]), (1, vec![10]), (2, vec![11])],
                vec![(10, vec![0, 1]), (11, vec![2])],
            ),
        )
        .unwrap();
        let correspondence = RecordedTraceResolver.resolve(&info).unwrap();

        assert_eq!(
            correspondence.origin_of(&obj(1, "a", 10)),
            Some(&[obj(1, "a", 0), obj(1, "a", 1)][..])
        );
        assert_eq!(
            correspondence.produced_by(&obj(1, "a", 1)),
            Some(std::slice::from_ref(&obj(1, "a", 10)))
        );
        assert!(correspondence.is_mutually_consistent());
    }

    #[test]
    fn unmentioned_elements_still_appear_with_empty_lists() {
        let info = TraceInfo::with_recorded(
            vec![prim("a", 0), prim("b", 1)],
            vec![prim("a", 10)],
            recorded(vec![(0, vec![10])], vec![(10, vec![0])]),
        )
        .unwrap();
        let correspondence = RecordedTraceResolver.resolve(&info).unwrap();

        assert_eq!(correspondence.produced_by(&prim("b", 1)), Some(&[][..]));
    }

    #[test]
    fn missing_recorded_trace_is_a_structural_violation() {
        let info = TraceInfo::new(vec![prim("a", 0)], vec![prim("a", 10)]).unwrap();
        assert_eq!(
            RecordedTraceResolver.resolve(&info).unwrap_err(),
            StructuralViolation::MissingRecordedTrace
        );
    }

    #[test]
    fn empty_pair_needs_no_recorded_trace() {
        let info = TraceInfo::new(vec![], vec![]).unwrap();
        let correspondence = RecordedTraceResolver.resolve(&info).unwrap();
        assert!(correspondence.is_empty());
    }

    #[test]
    fn recorded_times_without_elements_are_ignored() {
        let info = TraceInfo::with_recorded(
            vec![prim("a", 0)],
            vec![prim("a", 10)],
            recorded(vec![(0, vec![10, 99])], vec![(10, vec![0]), (98, vec![0])]),
        )
        .unwrap();
        let correspondence = RecordedTraceResolver.resolve(&info).unwrap();

        assert_eq!(
            correspondence.produced_by(&prim("a", 0)),
            Some(std::slice::from_ref(&prim("a", 10)))
        );
        assert_eq!(correspondence.backward().len(), 1);
    }
}
