// Filter resolver: the after side is a value-equal subsequence of before

use tracelink_error::{Diagnostic, ResolveResult};
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};
use tracing::warn;

use super::TraceResolver;

/// Resolver for dropping stages (filter, limit, skip, takeWhile,
/// dropWhile): every surviving value re-appears unchanged, in order.
///
/// A two-pointer merge walks both sides in time order; a before element
/// matches when its value equals the current after element's value,
/// otherwise it was dropped and maps to nothing.
pub struct FilterResolver;

impl TraceResolver for FilterResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        if pair.after_len() > pair.before_len() {
            let diagnostic = Diagnostic::SizeMismatch {
                before: pair.before_len(),
                after: pair.after_len(),
                detail: "a dropping stage never grows its input".into(),
            };
            warn!(%diagnostic, "inconsistent capture for dropping stage");
            builder.diagnostic(diagnostic);
        }

        let mut after = pair.after().peekable();
        for b in pair.before() {
            if let Some(&a) = after.peek() {
                if a.value == b.value {
                    builder.link(b, a);
                    after.next();
                }
            }
        }

        let unmatched = after.count();
        if unmatched > 0 {
            let diagnostic = Diagnostic::UnmatchedAfter { count: unmatched };
            warn!(%diagnostic, "after elements with no surviving before value");
            builder.diagnostic(diagnostic);
        }

        Ok(builder.build())
    }
}
