// Concatenation resolvers: stages that splice extra elements onto one
// end of the stream while passing the original elements through

use tracelink_error::{Diagnostic, ResolveResult};
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceInfo};
use tracing::warn;

use super::TraceResolver;

/// Resolver for appending stages: the before sequence re-appears as a
/// prefix of the after sequence, same relative order, with the spliced
/// elements behind it.
pub struct AppendResolver;

impl TraceResolver for AppendResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        for (b, a) in pair.before().zip(pair.after()) {
            builder.link(b, a);
        }

        // an appending stage never drops elements
        if pair.after_len() < pair.before_len() {
            let diagnostic = Diagnostic::SizeMismatch {
                before: pair.before_len(),
                after: pair.after_len(),
                detail: "an appending stage never drops elements".into(),
            };
            warn!(%diagnostic, "inconsistent capture for appending stage");
            builder.diagnostic(diagnostic);
        }

        Ok(builder.build())
    }
}

/// Resolver for prepending stages: the spliced elements run first, and the
/// before sequence re-appears behind them.
///
/// The alignment point is the first after element observed later than the
/// first before element; the before sequence pairs positionally against
/// the after elements from there on. When no after element qualifies,
/// nothing is matched.
pub struct PrependResolver;

impl TraceResolver for PrependResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        let mut builder = CorrespondenceBuilder::covering(pair);

        if let Some(first) = pair.first_before() {
            let tail = pair.after_later_than(first.time);
            for (b, a) in pair.before().zip(tail) {
                builder.link(b, a);
            }
        }

        Ok(builder.build())
    }
}
