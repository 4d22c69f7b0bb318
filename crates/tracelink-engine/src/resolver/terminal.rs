// Terminal-stage resolvers: full reductions, optional results, and
// terminals with no observable output

use tracelink_error::{ResolveResult, StructuralViolation};
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};

use super::TraceResolver;

/// Resolver for terminals that reduce the whole stream into exactly one
/// value (reduce, count, collect and friends).
///
/// Precondition: exactly one after element. Every before element maps to
/// it; its backward list is the full before sequence in time order.
pub struct AllToResultResolver;

impl TraceResolver for AllToResultResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        if pair.is_empty() {
            return Ok(Correspondence::empty());
        }
        if pair.after_len() != 1 {
            return Err(StructuralViolation::SingleAfterExpected { found: pair.after_len() });
        }

        let mut builder = CorrespondenceBuilder::covering(pair);
        if let Some(result) = pair.after().next() {
            for b in pair.before() {
                builder.link(b, result);
            }
        }
        Ok(builder.build())
    }
}

/// Resolver for optional-producing terminals (findFirst, findAny).
///
/// An empty after side means the optional was empty: every before element
/// maps to nothing. A single after element gathers every before element
/// sharing its identity key, in time order. More than one after element
/// violates the stage's structure.
pub struct OptionalResultResolver;

impl TraceResolver for OptionalResultResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        if pair.after_len() > 1 {
            return Err(StructuralViolation::AtMostOneAfterExpected { found: pair.after_len() });
        }

        let mut builder = CorrespondenceBuilder::covering(pair);
        if let Some(result) = pair.after().next() {
            let key = result.key();
            for b in pair.before() {
                if b.key() == key {
                    builder.link(b, result);
                }
            }
        }
        Ok(builder.build())
    }
}

/// Resolver for terminals whose output is not observable (forEach,
/// match terminals): every before element maps to nothing and the
/// backward side stays empty, whatever the capture recorded after the
/// stage.
pub struct EmptyResolver;

impl TraceResolver for EmptyResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        Ok(CorrespondenceBuilder::covering_before(pair).build())
    }
}
