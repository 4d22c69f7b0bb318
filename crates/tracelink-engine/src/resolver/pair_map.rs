// PairMap resolver: sliding two-element combine stages

use tracelink_error::ResolveResult;
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};

use super::TraceResolver;

/// Resolver for sliding-pair combining stages: each output is formed from
/// two consecutive inputs, so in capture order the outputs interleave
/// with the inputs that produced them.
///
/// Each before element links to the after element observed immediately
/// before it and the one observed immediately after it, when they exist;
/// comparisons are strict in both directions, so an after element sharing
/// a before element's exact time links to neither side of it.
pub struct PairMapResolver;

impl TraceResolver for PairMapResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        for b in pair.before() {
            if let Some(a) = pair.after_strictly_earlier(b.time) {
                builder.link(b, a);
            }
            if let Some(a) = pair.after_strictly_later(b.time) {
                builder.link(b, a);
            }
        }

        Ok(builder.build())
    }
}
