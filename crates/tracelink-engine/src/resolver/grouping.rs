// Attribution by capture-time boundaries: grouping and fused
// filter-then-map stages

use tracelink_error::ResolveResult;
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};

use super::TraceResolver;

/// Resolver for grouping stages (flatMap-style): all before elements
/// captured ahead of an after boundary collapse into that after element.
///
/// Walking the after side in time order, each after element takes every
/// not-yet-consumed before element captured strictly earlier than it.
/// Before elements past the last boundary belong to no after element.
pub struct ChunkedResolver;

impl TraceResolver for ChunkedResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        let mut before = pair.before().peekable();
        for a in pair.after() {
            while let Some(&b) = before.peek() {
                if b.time >= a.time {
                    break;
                }
                builder.link(b, a);
                before.next();
            }
        }

        Ok(builder.build())
    }
}

/// Resolver for fused filter-then-map stages: each after element traces
/// back to the nearest before element not captured later than it.
///
/// The latest before element at or ahead of each after time is the
/// candidate; it links only when strictly earlier, so an exact time
/// collision records no pair for that after element.
pub struct FilteredMapResolver;

impl TraceResolver for FilteredMapResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        for a in pair.after() {
            if let Some(b) = pair.before_at_or_earlier(a.time) {
                if b.time < a.time {
                    builder.link(b, a);
                }
            }
        }

        Ok(builder.build())
    }
}
